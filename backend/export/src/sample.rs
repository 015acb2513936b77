/// Sample document touching every conversion rule.
pub const SAMPLE_MARKDOWN: &str = r#"# Markdown Conversion Sample

This is **bold**, this is *italic*, and this is ***both***.
Underscores work too: __bold__, _italic_, ___both___.
~~Struck~~ text and `inline code` lose their markers.

## Lists

- First item
- Second item with a [link](https://example.com)
  * Nested item
+ Plus marker

1. Step one
2. Step two

---

> A quoted line keeps its text.

![Diagram of the pipeline](pipeline.png)



```
*Fenced content* stays exactly as written.
# Not a heading
```

Done.
"#;

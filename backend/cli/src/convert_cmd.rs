//! CLI Convert, Print, and Sample Commands

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use mdplain_config::MdplainConfig;
use mdplain_export::{
    read_markdown_file, read_markdown_reader, PrintExporter, TextExporter, SAMPLE_MARKDOWN,
};
use mdplain_markdown::Converter;

/// Read from `input`, or stdin when it is absent or `-`.
pub async fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => read_markdown_file(path)
            .await
            .with_context(|| format!("Failed to import {}", path.display())),
        _ => read_markdown_reader(tokio::io::stdin())
            .await
            .context("Failed to read stdin"),
    }
}

/// Split an explicit output path into its directory and file name.
fn split_output(path: &Path) -> Result<(PathBuf, String)> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Output path has no file name: {}", path.display()))?
        .to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, name))
}

pub struct ConvertArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub stdout: bool,
    pub report: bool,
}

pub async fn convert(config: &MdplainConfig, args: ConvertArgs) -> Result<()> {
    let markdown = read_input(args.input.as_deref()).await?;
    let converter = Converter::new();

    let text = if args.report {
        let (text, report) = converter.convert_with_report(&markdown);
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
        text
    } else {
        converter.convert(&markdown)
    };

    if args.stdout {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    let (dir, name) = match &args.output {
        Some(path) => split_output(path)?,
        None => (
            PathBuf::from(config.output_dir()),
            config.text_file_name().to_string(),
        ),
    };
    let path = TextExporter::new(dir).export(&text, Some(&name)).await?;
    info!(path = %path.display(), "Conversion complete");
    println!("{}", path.display());
    Ok(())
}

pub struct PrintArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub title: Option<String>,
}

pub async fn print(config: &MdplainConfig, args: PrintArgs) -> Result<()> {
    let markdown = read_input(args.input.as_deref()).await?;
    let text = Converter::new().convert(&markdown);
    let title = args.title.as_deref().unwrap_or(config.print_title());

    let (dir, name) = match &args.output {
        Some(path) => split_output(path)?,
        None => (
            PathBuf::from(config.output_dir()),
            config.print_file_name().to_string(),
        ),
    };
    let path = PrintExporter::new(dir).export(title, &text, Some(&name)).await?;
    info!(path = %path.display(), "Print document ready; open it in a browser to print or save as PDF");
    println!("{}", path.display());
    Ok(())
}

pub fn sample(convert: bool) {
    if convert {
        print!("{}", Converter::new().convert(SAMPLE_MARKDOWN));
    } else {
        print!("{SAMPLE_MARKDOWN}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_output() {
        let (dir, name) = split_output(Path::new("out/notes.txt")).unwrap();
        assert_eq!(dir, PathBuf::from("out"));
        assert_eq!(name, "notes.txt");

        let (dir, name) = split_output(Path::new("notes.txt")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "notes.txt");

        assert!(split_output(Path::new("/")).is_err());
    }

    #[tokio::test]
    async fn test_convert_writes_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.md");
        tokio::fs::write(&input, "# Title\n\n- **a**\n").await.unwrap();

        let mut config = mdplain_config::apply_all_defaults(MdplainConfig::default());
        config.export.as_mut().unwrap().output_dir =
            Some(dir.path().join("out").display().to_string());

        convert(
            &config,
            ConvertArgs {
                input: Some(input),
                output: None,
                stdout: false,
                report: false,
            },
        )
        .await
        .unwrap();

        let written = tokio::fs::read_to_string(dir.path().join("out/converted-text.txt"))
            .await
            .unwrap();
        assert_eq!(written, "Title\n\n• a\n");
    }

    #[tokio::test]
    async fn test_print_writes_explicit_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        tokio::fs::write(&input, "*hi*").await.unwrap();
        let output = dir.path().join("handout.html");

        let config = mdplain_config::apply_all_defaults(MdplainConfig::default());
        print(
            &config,
            PrintArgs {
                input: Some(input),
                output: Some(output.clone()),
                title: Some("Handout".to_string()),
            },
        )
        .await
        .unwrap();

        let html = tokio::fs::read_to_string(&output).await.unwrap();
        assert!(html.contains("<title>Handout</title>"));
        assert!(html.contains("<pre>hi</pre>"));
    }
}

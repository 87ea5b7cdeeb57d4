//! Source file parsing and text extraction.

use grounded_core::{AppError, AppResult};
use std::fs;
use std::path::Path;

/// Supported source document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Markdown,
    PlainText,
    Unsupported,
}

impl SourceKind {
    /// Detect the source kind from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("pdf") => Self::Pdf,
            Some("md") | Some("markdown") => Self::Markdown,
            Some("txt") => Self::PlainText,
            _ => Self::Unsupported,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Markdown => "markdown",
            Self::PlainText => "text",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Parse a source file and extract clean text.
///
/// Fails per-file; ingestion logs and skips failures rather than aborting
/// the run.
pub fn parse_file(path: &Path) -> AppResult<String> {
    match SourceKind::from_path(path) {
        SourceKind::Pdf => parse_pdf(path),
        SourceKind::Markdown => {
            let raw = read_text(path)?;
            Ok(clean_markdown(&raw))
        }
        SourceKind::PlainText => read_text(path),
        SourceKind::Unsupported => Err(AppError::Ingestion(format!(
            "Unsupported file type: {:?}",
            path
        ))),
    }
}

fn read_text(path: &Path) -> AppResult<String> {
    fs::read_to_string(path)
        .map_err(|e| AppError::Ingestion(format!("Failed to read {:?}: {}", path, e)))
}

fn parse_pdf(path: &Path) -> AppResult<String> {
    let bytes = fs::read(path)
        .map_err(|e| AppError::Ingestion(format!("Failed to read {:?}: {}", path, e)))?;

    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| AppError::Ingestion(format!("Failed to extract text from {:?}: {}", path, e)))?;

    // Collapse the extractor's layout whitespace into readable prose
    Ok(normalize_whitespace(&text))
}

/// Clean markdown by removing header markers, rules, and fenced code
/// blocks, fence contents included.
fn clean_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_fence = false;

    for line in text.lines() {
        let trimmed = line.trim_start_matches('#').trim();

        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence || trimmed.starts_with("---") {
            continue;
        }

        if !trimmed.is_empty() {
            result.push_str(trimmed);
            result.push('\n');
        }
    }

    result.trim().to_string()
}

fn normalize_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut blank_run = 0usize;

    for line in text.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            blank_run += 1;
            if blank_run == 1 {
                result.push('\n');
            }
        } else {
            blank_run = 0;
            result.push_str(&collapsed);
            result.push('\n');
        }
    }

    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_detection() {
        assert_eq!(SourceKind::from_path(Path::new("doc.pdf")), SourceKind::Pdf);
        assert_eq!(SourceKind::from_path(Path::new("doc.PDF")), SourceKind::Pdf);
        assert_eq!(
            SourceKind::from_path(Path::new("notes.md")),
            SourceKind::Markdown
        );
        assert_eq!(
            SourceKind::from_path(Path::new("notes.txt")),
            SourceKind::PlainText
        );
        assert_eq!(
            SourceKind::from_path(Path::new("image.png")),
            SourceKind::Unsupported
        );
    }

    #[test]
    fn test_unsupported_file_is_an_error() {
        assert!(parse_file(Path::new("image.png")).is_err());
    }

    #[test]
    fn test_clean_markdown() {
        let input = "# Header\n\nSome text\n\n```rust\nlet secret = 1;\n```\n\nMore text";
        let output = clean_markdown(input);
        assert!(output.contains("Header"));
        assert!(output.contains("Some text"));
        assert!(output.contains("More text"));
        assert!(!output.contains("```"));
        assert!(!output.contains("secret"));
    }

    #[test]
    fn test_clean_markdown_unclosed_fence_drops_tail() {
        let input = "Intro\n\n```\ndangling code";
        let output = clean_markdown(input);
        assert_eq!(output, "Intro");
    }

    #[test]
    fn test_normalize_whitespace() {
        let input = "a   b\n\n\n\nc    d";
        assert_eq!(normalize_whitespace(input), "a b\n\nc d");
    }

    #[test]
    fn test_parse_plain_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "hello world").unwrap();
        assert_eq!(parse_file(&path).unwrap(), "hello world");
    }
}

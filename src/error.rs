//! Error types for loading tree documents

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to read tree document: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid tree document at line {line}, column {column}: {message}")]
    Json {
        message: String,
        line: usize,
        column: usize,
    },
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json appends " at line L column C" to its Display output
        let full = err.to_string();
        let message = match full.rfind(" at line ") {
            Some(idx) => full[..idx].to_string(),
            None => full,
        };
        DocumentError::Json {
            message,
            line: err.line(),
            column: err.column(),
        }
    }
}

impl DocumentError {
    /// Source span of the error, if it points into the document
    pub fn span(&self, source: &str) -> Option<Span> {
        match self {
            DocumentError::Json { line, column, .. } => {
                let offset = line_column_offset(source, *line, *column);
                let end = source[offset..]
                    .chars()
                    .next()
                    .map_or(offset, |c| offset + c.len_utf8());
                Some(offset..end)
            }
            DocumentError::Io(_) => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span(source) else {
            return self.to_string();
        };
        let message = match self {
            DocumentError::Json { message, .. } => message.clone(),
            DocumentError::Io(e) => e.to_string(),
        };

        // ariadne counts characters, not bytes
        let span = char_index(source, span.start)..char_index(source, span.end);

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid tree document")
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// Convert serde_json's 1-based line and byte column into a byte offset.
///
/// The result is clamped to the line and moved back onto a char boundary.
fn line_column_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut offset = 0;
    for (idx, text) in source.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let mut within = column.saturating_sub(1).min(text.len());
            while !text.is_char_boundary(within) {
                within -= 1;
            }
            return offset + within;
        }
        offset += text.len();
    }
    source.len()
}

fn char_index(source: &str, byte_offset: usize) -> usize {
    source
        .get(..byte_offset)
        .map_or_else(|| source.chars().count(), |prefix| prefix.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_column_offset() {
        let src = "ab\ncde\nf";
        assert_eq!(line_column_offset(src, 1, 1), 0);
        assert_eq!(line_column_offset(src, 2, 2), 4);
        assert_eq!(line_column_offset(src, 3, 1), 7);
        assert_eq!(line_column_offset(src, 9, 1), src.len());
    }

    #[test]
    fn test_columns_are_bytes() {
        // "é" is two bytes, so byte column 8 is the 'x' after it
        let src = "{\"é\": x}";
        assert_eq!(line_column_offset(src, 1, 8), 7);
        assert_eq!(&src[7..8], "x");
        // a column inside a multi-byte char snaps back to its start
        assert_eq!(line_column_offset(src, 1, 4), 2);
    }

    #[test]
    fn test_span_covers_one_char() {
        let src = "[\"ü\",]";
        let err = DocumentError::Json {
            message: "bad".to_string(),
            line: 1,
            column: 3,
        };
        assert_eq!(err.span(src), Some(2..4));
        assert_eq!(char_index(src, 4), 3);
    }

    #[test]
    fn test_format_points_past_non_ascii_text() {
        let source = "{\"名前\": \"ü\", \"root\": ]}";
        let err: DocumentError = serde_json::from_str::<serde_json::Value>(source)
            .unwrap_err()
            .into();
        let span = err.span(source).unwrap();
        assert_eq!(&source[span], "]");
        assert!(err.format(source, "tree.json").contains("tree.json"));
    }

    #[test]
    fn test_json_error_strips_location_suffix() {
        let err: DocumentError = serde_json::from_str::<serde_json::Value>("[1,")
            .unwrap_err()
            .into();
        match &err {
            DocumentError::Json { message, line, .. } => {
                assert!(!message.contains(" at line "));
                assert_eq!(*line, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_format_includes_filename() {
        let source = "{\n  \"root\": ]\n}";
        let err: DocumentError = serde_json::from_str::<serde_json::Value>(source)
            .unwrap_err()
            .into();
        let report = err.format(source, "tree.json");
        assert!(report.contains("tree.json"));
        assert!(report.contains("invalid tree document"));
    }
}

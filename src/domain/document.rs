use serde::{Deserialize, Serialize};
use thiserror::Error;

const TITLE_MARKER: &str = "TITLE:";
const AUTHOR_MARKER: &str = "AUTHOR:";
const CONTENT_MARKER: &str = "CONTENT:";

/// A document stored in a library.
///
/// On disk a document is plain text with one marker per field:
///
/// ```text
/// TITLE:<title>
/// AUTHOR:<author>
/// CONTENT:
/// <content>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub author: String,
    pub content: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("missing '{0}' marker")]
    MissingMarker(&'static str),

    #[error("markers are out of order")]
    OutOfOrder,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Render the marker-delimited text form.
    pub fn encode(&self) -> String {
        format!(
            "{TITLE_MARKER}{}\n{AUTHOR_MARKER}{}\n{CONTENT_MARKER}\n{}",
            self.title, self.author, self.content
        )
    }

    /// Parse the marker-delimited text form produced by [`Document::encode`].
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let title_pos = find_marker(text, TITLE_MARKER)?;
        let author_pos = find_marker(text, AUTHOR_MARKER)?;
        let content_pos = find_marker(text, CONTENT_MARKER)?;

        if !(title_pos < author_pos && author_pos < content_pos) {
            return Err(DocumentError::OutOfOrder);
        }

        let title = strip_line_break(&text[title_pos + TITLE_MARKER.len()..author_pos]);
        let author = strip_line_break(&text[author_pos + AUTHOR_MARKER.len()..content_pos]);

        let body = &text[content_pos + CONTENT_MARKER.len()..];
        let body = body
            .strip_prefix("\r\n")
            .or_else(|| body.strip_prefix('\n'))
            .unwrap_or(body);
        let content = body.trim_end_matches(['\n', '\r']);

        Ok(Self {
            title: title.to_string(),
            author: author.to_string(),
            content: content.to_string(),
        })
    }
}

fn find_marker(text: &str, marker: &'static str) -> Result<usize, DocumentError> {
    text.find(marker).ok_or(DocumentError::MissingMarker(marker))
}

fn strip_line_break(field: &str) -> &str {
    field
        .strip_suffix("\r\n")
        .or_else(|| field.strip_suffix('\n'))
        .unwrap_or(field)
}

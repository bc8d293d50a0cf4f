mod xml;

use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use thiserror::Error;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use tubedigest_core::domain::comments::Comment;

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOCX_FILE_NAME: &str = "comments.docx";
pub const SEPARATOR_WIDTH: usize = 40;
const DEFAULT_TITLE: &str = "YouTube comments";

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub title: String,
    pub created: DateTime<Utc>,
}

impl DocumentMeta {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            created: Utc::now(),
        }
    }
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

/// Builds a `.docx` with three paragraphs per comment, in input order.
pub fn create_docx(comments: &[Comment]) -> Result<Vec<u8>, DocxError> {
    write_docx(comments, &DocumentMeta::default())
}

pub fn write_docx(comments: &[Comment], meta: &DocumentMeta) -> Result<Vec<u8>, DocxError> {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut paragraphs = Vec::with_capacity(comments.len() * 3);
    for comment in comments {
        paragraphs.push(likes_line(comment));
        paragraphs.push(comment.text.clone());
        paragraphs.push(separator.clone());
    }
    let document = xml::document_xml(paragraphs.iter().map(String::as_str))?;
    let core = xml::core_xml(meta)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let parts: [(&str, &[u8]); 5] = [
        ("[Content_Types].xml", xml::CONTENT_TYPES_XML.as_bytes()),
        ("_rels/.rels", xml::ROOT_RELS_XML.as_bytes()),
        ("docProps/core.xml", &core),
        ("docProps/app.xml", xml::APP_XML.as_bytes()),
        ("word/document.xml", &document),
    ];
    for (name, bytes) in parts {
        zip.start_file(name, options)?;
        zip.write_all(bytes)?;
    }
    Ok(zip.finish()?.into_inner())
}

/// `Likes: N`, or `Likes: unknown` when the platform omitted the count.
pub fn likes_line(comment: &Comment) -> String {
    match comment.like_count {
        Some(count) => format!("Likes: {count}"),
        None => "Likes: unknown".to_string(),
    }
}

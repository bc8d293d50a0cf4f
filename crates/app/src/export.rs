use thiserror::Error;
use tracing::{info, warn};

use tubedigest_core::domain::comments::sort_by_popularity;
use tubedigest_core::error::CoreError;
use tubedigest_core::types::video_id::VideoId;
use tubedigest_infra::docx::{DocumentMeta, DocxError, write_docx};
use tubedigest_infra::youtube::{YoutubeClient, YoutubeError};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid YouTube URL: {0}")]
    InvalidInput(#[from] CoreError),
    #[error("{0}")]
    Remote(#[from] YoutubeError),
    #[error("document error: {0}")]
    Document(#[from] DocxError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorKind {
    InvalidInput,
    RemoteApi,
    Transport,
    Document,
}

impl ExportError {
    pub fn kind(&self) -> ExportErrorKind {
        match self {
            ExportError::InvalidInput(_) => ExportErrorKind::InvalidInput,
            ExportError::Remote(err) if err.is_transport() => ExportErrorKind::Transport,
            ExportError::Remote(_) => ExportErrorKind::RemoteApi,
            ExportError::Document(_) => ExportErrorKind::Document,
        }
    }
}

#[derive(Debug)]
pub enum ExportOutcome {
    /// The fetch succeeded but the video has no comments; no document is built.
    Empty,
    Document { bytes: Vec<u8>, total: usize },
}

pub async fn export_comments(
    client: &YoutubeClient,
    api_key: &str,
    url: &str,
) -> Result<ExportOutcome, ExportError> {
    let video_id = VideoId::from_url(url)?;
    info!(video_id = %video_id, "fetching comments");
    let mut comments = client.get_comments(&video_id, api_key).await?;
    let total = comments.len();
    info!(video_id = %video_id, total, "retrieved comments");
    if comments.is_empty() {
        warn!(video_id = %video_id, "no comments found for this video");
        return Ok(ExportOutcome::Empty);
    }

    sort_by_popularity(&mut comments);
    let meta = DocumentMeta::new(format!("Comments for {video_id}"));
    let bytes = write_docx(&comments, &meta)?;
    Ok(ExportOutcome::Document { bytes, total })
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use zip::ZipArchive;

    use super::*;

    fn thread(text: &str, likes: Option<u64>) -> serde_json::Value {
        let mut snippet = json!({ "textDisplay": text });
        if let Some(likes) = likes {
            snippet["likeCount"] = json!(likes);
        }
        json!({ "snippet": { "topLevelComment": { "snippet": snippet } } })
    }

    async fn server_with_items(items: Vec<serde_json::Value>) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
            .mount(&server)
            .await;
        server
    }

    fn document_xml(bytes: &[u8]) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name("word/document.xml").unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }

    #[tokio::test]
    async fn invalid_url_fails_before_any_request() {
        let server = server_with_items(Vec::new()).await;
        let client = YoutubeClient::new(reqwest::Client::new(), server.uri());

        let err = export_comments(&client, "key", "https://example.com/watch")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ExportErrorKind::InvalidInput);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_result_produces_no_document() {
        let server = server_with_items(Vec::new()).await;
        let client = YoutubeClient::new(reqwest::Client::new(), server.uri());

        let outcome = export_comments(&client, "key", "https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap();

        assert!(matches!(outcome, ExportOutcome::Empty));
    }

    #[tokio::test]
    async fn document_lists_comments_by_popularity() {
        let server = server_with_items(vec![
            thread("five", Some(5)),
            thread("missing", None),
            thread("twenty", Some(20)),
            thread("zero", Some(0)),
        ])
        .await;
        let client = YoutubeClient::new(reqwest::Client::new(), server.uri());

        let outcome = export_comments(&client, "key", "https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap();

        let ExportOutcome::Document { bytes, total } = outcome else {
            panic!("expected a document");
        };
        assert_eq!(total, 4);
        let xml = document_xml(&bytes);
        let positions: Vec<usize> = ["twenty", "five", "zero", "missing"]
            .iter()
            .map(|text| xml.find(&format!(">{text}<")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(xml.contains("Likes: unknown"));
    }

    #[tokio::test]
    async fn remote_rejection_is_reported_as_remote_api() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/commentThreads"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "errors": [{ "reason": "keyInvalid" }]
                }
            })))
            .mount(&server)
            .await;
        let client = YoutubeClient::new(reqwest::Client::new(), server.uri());

        let err = export_comments(&client, "bad-key", "https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ExportErrorKind::RemoteApi);
        assert!(err.to_string().contains("API key not valid"));
    }
}

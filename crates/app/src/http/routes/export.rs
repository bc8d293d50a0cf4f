use axum::Json;
use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::export::{ExportError, ExportErrorKind, ExportOutcome, export_comments};
use crate::state::AppState;
use tubedigest_infra::docx::DOCX_CONTENT_TYPE;

const MAX_URL_LEN: usize = 2048;
const COMMENT_COUNT_HEADER: HeaderName = HeaderName::from_static("x-comment-count");
// Keep in sync with DOCX_FILE_NAME.
const ATTACHMENT_DISPOSITION: &str = "attachment; filename=\"comments.docx\"";

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ExportApiError {
    #[error("url is required")]
    MissingUrl,
    #[error("url is too long (max {} chars)", MAX_URL_LEN)]
    UrlTooLong,
    #[error("no comments found for this video")]
    NoComments,
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub async fn get_comments_docx(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> Result<Response, ExportApiError> {
    let url = normalize_url(params.url)?;
    let outcome = export_comments(&state.youtube, &state.config.api_key, &url).await?;
    let ExportOutcome::Document { bytes, total } = outcome else {
        return Err(ExportApiError::NoComments);
    };
    let headers = [
        (CONTENT_TYPE, HeaderValue::from_static(DOCX_CONTENT_TYPE)),
        (CONTENT_DISPOSITION, HeaderValue::from_static(ATTACHMENT_DISPOSITION)),
        (COMMENT_COUNT_HEADER, HeaderValue::from(total)),
    ];
    Ok((headers, bytes).into_response())
}

fn normalize_url(value: Option<String>) -> Result<String, ExportApiError> {
    let raw = value.unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ExportApiError::MissingUrl);
    }
    if trimmed.len() > MAX_URL_LEN {
        return Err(ExportApiError::UrlTooLong);
    }
    Ok(trimmed.to_string())
}

fn status_for(err: &ExportApiError) -> StatusCode {
    match err {
        ExportApiError::MissingUrl | ExportApiError::UrlTooLong => StatusCode::BAD_REQUEST,
        ExportApiError::NoComments => StatusCode::NOT_FOUND,
        ExportApiError::Export(err) => match err.kind() {
            ExportErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ExportErrorKind::RemoteApi | ExportErrorKind::Transport => StatusCode::BAD_GATEWAY,
            ExportErrorKind::Document => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

impl IntoResponse for ExportApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            warn!(error = %self, status = status.as_u16(), "comment export failed");
        }
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubedigest_core::error::CoreError;
    use tubedigest_infra::docx::DOCX_FILE_NAME;
    use tubedigest_infra::youtube::YoutubeError;

    #[test]
    fn normalize_url_rejects_blank_and_oversized() {
        assert!(matches!(normalize_url(None), Err(ExportApiError::MissingUrl)));
        assert!(matches!(normalize_url(Some("  ".to_string())), Err(ExportApiError::MissingUrl)));
        let long = format!("https://youtu.be/{}", "a".repeat(MAX_URL_LEN));
        assert!(matches!(normalize_url(Some(long)), Err(ExportApiError::UrlTooLong)));
        assert_eq!(
            normalize_url(Some(" https://youtu.be/dQw4w9WgXcQ ".to_string())).unwrap(),
            "https://youtu.be/dQw4w9WgXcQ"
        );
    }

    #[test]
    fn disposition_names_the_docx_file() {
        assert!(ATTACHMENT_DISPOSITION.starts_with("attachment;"));
        assert!(ATTACHMENT_DISPOSITION.contains(&format!("filename=\"{DOCX_FILE_NAME}\"")));
    }

    #[test]
    fn status_maps_error_kinds() {
        let invalid = ExportApiError::Export(ExportError::InvalidInput(
            CoreError::InvalidVideoUrl("x".to_string()),
        ));
        assert_eq!(status_for(&invalid), StatusCode::BAD_REQUEST);

        let remote = ExportApiError::Export(ExportError::Remote(YoutubeError::Api {
            status: 403,
            reason: Some("quotaExceeded".to_string()),
            message: "quota exceeded".to_string(),
        }));
        assert_eq!(status_for(&remote), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(&ExportApiError::NoComments), StatusCode::NOT_FOUND);
    }

    #[test]
    fn remote_message_is_surfaced_verbatim() {
        let err = ExportApiError::Export(ExportError::Remote(YoutubeError::Api {
            status: 404,
            reason: Some("videoNotFound".to_string()),
            message: "The video identified by the videoId parameter could not be found."
                .to_string(),
        }));
        assert!(err.to_string().contains("could not be found"));
    }
}

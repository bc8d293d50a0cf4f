use serde::{Deserialize, Serialize};
use serde_json::from_str;
use thiserror::Error;
use tracing::{debug, info};

use tubedigest_core::domain::comments::Comment;
use tubedigest_core::types::video_id::VideoId;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
/// Page size ceiling imposed by the commentThreads endpoint.
pub const MAX_RESULTS_PER_PAGE: u32 = 100;
const USER_AGENT: &str = "tubedigest";
const API_KEY_HEADER: &str = "X-Goog-Api-Key";

#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("youtube api error ({status}): {message}")]
    Api {
        status: u16,
        reason: Option<String>,
        message: String,
    },
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

// The request URL is dropped so no query parameter ever reaches a message.
impl From<reqwest::Error> for YoutubeError {
    fn from(err: reqwest::Error) -> Self {
        YoutubeError::Transport(err.without_url())
    }
}

impl YoutubeError {
    pub fn is_transport(&self) -> bool {
        matches!(self, YoutubeError::Transport(_))
    }
}

#[derive(Debug, Clone)]
pub struct YoutubeClient {
    http: reqwest::Client,
    base_url: String,
}

impl YoutubeClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Drains every page of top-level comment threads for `video_id`.
    ///
    /// Pages are requested one at a time until the response carries no
    /// `nextPageToken`. The first failing page aborts the whole fetch and
    /// nothing collected so far is returned.
    pub async fn get_comments(
        &self,
        video_id: &VideoId,
        api_key: &str,
    ) -> Result<Vec<Comment>, YoutubeError> {
        let mut comments = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page = 0usize;

        loop {
            page += 1;
            let response = self
                .fetch_page(video_id, api_key, page_token.as_deref())
                .await?;
            let items = response.items.len();
            comments.extend(response.items.into_iter().map(CommentThreadItem::into_comment));
            page_token = response.next_page_token.filter(|token| !token.is_empty());
            debug!(
                video_id = %video_id,
                page,
                items,
                has_next = page_token.is_some(),
                "fetched comment page"
            );
            if page_token.is_none() {
                break;
            }
        }

        info!(video_id = %video_id, pages = page, total = comments.len(), "comment fetch complete");
        Ok(comments)
    }

    async fn fetch_page(
        &self,
        video_id: &VideoId,
        api_key: &str,
        page_token: Option<&str>,
    ) -> Result<CommentThreadListResponse, YoutubeError> {
        let url = format!("{}/commentThreads", self.base_url);
        let query = CommentThreadsQuery {
            part: "snippet",
            video_id: video_id.as_str(),
            max_results: MAX_RESULTS_PER_PAGE,
            page_token,
        };
        let response = self
            .http
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .header(API_KEY_HEADER, api_key)
            .query(&query)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }
        from_str(&body)
            .map_err(|err| YoutubeError::InvalidResponse(format!("comment thread list: {err}")))
    }
}

fn api_error(status: u16, body: &str) -> YoutubeError {
    match from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => YoutubeError::Api {
            status,
            reason: envelope
                .error
                .errors
                .into_iter()
                .find_map(|detail| detail.reason),
            message: envelope.error.message,
        },
        Err(_) => YoutubeError::Api {
            status,
            reason: None,
            message: if body.trim().is_empty() {
                format!("request failed with status {status}")
            } else {
                body.trim().to_string()
            },
        },
    }
}

#[derive(Debug, Serialize)]
struct CommentThreadsQuery<'a> {
    part: &'a str,
    #[serde(rename = "videoId")]
    video_id: &'a str,
    #[serde(rename = "maxResults")]
    max_results: u32,
    #[serde(rename = "pageToken", skip_serializing_if = "Option::is_none")]
    page_token: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct CommentThreadListResponse {
    #[serde(default)]
    items: Vec<CommentThreadItem>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommentThreadItem {
    snippet: ThreadSnippet,
}

#[derive(Debug, Deserialize)]
struct ThreadSnippet {
    #[serde(rename = "topLevelComment")]
    top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
struct CommentSnippet {
    #[serde(rename = "textDisplay", default)]
    text_display: String,
    #[serde(rename = "likeCount")]
    like_count: Option<u64>,
}

impl CommentThreadItem {
    fn into_comment(self) -> Comment {
        let snippet = self.snippet.top_level_comment.snippet;
        Comment::new(snippet.text_display, snippet.like_count)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    reason: Option<String>,
}

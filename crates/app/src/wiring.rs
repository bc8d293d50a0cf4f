use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;

use crate::config::AppConfig;
use crate::state::AppState;
use tubedigest_infra::youtube::YoutubeClient;

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub fn build_state(config: AppConfig) -> Result<AppState, WiringError> {
    let client = Client::builder().timeout(config.request_timeout).build()?;
    let youtube = YoutubeClient::new(client, config.api_base_url.clone());
    Ok(AppState {
        config: Arc::new(config),
        youtube,
    })
}

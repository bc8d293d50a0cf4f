use std::sync::Arc;

use crate::config::AppConfig;
use tubedigest_infra::youtube::YoutubeClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub youtube: YoutubeClient,
}

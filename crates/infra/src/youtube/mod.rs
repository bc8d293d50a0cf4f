mod data_api;

pub use data_api::{DEFAULT_API_BASE_URL, MAX_RESULTS_PER_PAGE, YoutubeClient, YoutubeError};

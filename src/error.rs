use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to parse study page: {reason}")]
    Parse { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to deliver notification: {reason}")]
    Notify { reason: String },

    #[error("Destination channel {channel_id} is not available")]
    DestinationUnavailable { channel_id: u64 },

    #[error("{resource} has been closed")]
    Closed { resource: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, MonitorError>;

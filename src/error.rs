use std::path::PathBuf;
use thiserror::Error;

/// Why the catalog could not be loaded. Recovered locally by showing a
/// warning in place of the data view; never retried.
#[derive(Error, Debug)]
pub enum LoadFailure {
    #[error("HTTP {status} while fetching {location}")]
    Status { status: u16, location: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog document is not a JSON array")]
    NotAnArray,

    #[error("Catalog was already requested for this page")]
    AlreadyAttempted,
}

impl LoadFailure {
    /// Short text for the status bar and stderr.
    pub fn user_message(&self) -> String {
        match self {
            LoadFailure::Status { status, .. } => format!("Server answered HTTP {}", status),
            LoadFailure::Network(e) => format!("Network error: {}", e),
            LoadFailure::InvalidUrl(msg) => format!("Invalid catalog address: {}", msg),
            LoadFailure::Io { path, .. } => format!("Catalog file not readable: {}", path.display()),
            LoadFailure::Parse(_) | LoadFailure::NotAnArray => {
                "Catalog data is malformed".to_string()
            }
            LoadFailure::AlreadyAttempted => "Catalog already loaded".to_string(),
        }
    }
}

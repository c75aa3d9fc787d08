use thiserror::Error;

/// Startup failures of the dashboard process.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to build API client: {0}")]
    Client(String),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Failures talking to the sentiment API. Each names the endpoint it hit.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned status {status}: {detail}")]
    Status {
        endpoint: &'static str,
        status: u16,
        detail: String,
    },

    #[error("{endpoint} returned an unreadable body: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

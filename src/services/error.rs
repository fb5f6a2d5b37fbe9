use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{provider} request failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} reported an error: {message}")]
    Upstream {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} response could not be parsed: {message}")]
    Parse {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} is not configured: {message}")]
    Config {
        provider: &'static str,
        message: String,
    },
}

impl FetchError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { source, .. } => {
                source.is_timeout() || source.is_connect() || source.is_request()
            }
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Upstream { .. } | Self::Parse { .. } | Self::Config { .. } => false,
        }
    }

    pub fn provider(&self) -> &'static str {
        match self {
            Self::Http { provider, .. }
            | Self::Status { provider, .. }
            | Self::Upstream { provider, .. }
            | Self::Parse { provider, .. }
            | Self::Config { provider, .. } => provider,
        }
    }
}

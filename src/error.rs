use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api {
        status: StatusCode,
        message: String,
    },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Boundary dataset error: {0}")]
    Boundaries(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<geojson::Error> for AppError {
    fn from(err: geojson::Error) -> Self {
        AppError::Boundaries(err.to_string())
    }
}

impl AppError {
    /// Short tag used in log lines for failed country lookups.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Network(e) if e.is_timeout() => "timeout",
            AppError::Network(_) => "network",
            AppError::Api { status, .. } if *status == StatusCode::NOT_FOUND => "unknown_code",
            AppError::Api { status, .. } if status.is_server_error() => "server",
            AppError::Api { .. } => "api",
            AppError::Decode(_) => "decode",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Boundaries(_) => "boundaries",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_kinds() {
        let not_found = AppError::Api {
            status: StatusCode::NOT_FOUND,
            message: "Not Found".to_string(),
        };
        assert_eq!(not_found.kind(), "unknown_code");

        let server = AppError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: String::new(),
        };
        assert_eq!(server.kind(), "server");
        assert_eq!(server.to_string(), "API error 500 Internal Server Error: ");
    }
}

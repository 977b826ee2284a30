use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No backend URL configured. Set backend_url in the config file.")]
    BackendNotConfigured,

    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Backend returned HTTP {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("Document not found")]
    NotFound,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Message suitable for showing to the user. Prefers the backend's
    /// `detail` field; configuration problems are shown verbatim; anything
    /// else collapses to a generic line (the full error goes to the log).
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api { detail, .. } if !detail.is_empty() => detail.clone(),
            AppError::Config(_)
            | AppError::BackendNotConfigured
            | AppError::InvalidBackendUrl { .. }
            | AppError::NotFound => self.to_string(),
            _ => "Request failed. Check the backend and try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_backend_detail() {
        let err = AppError::Api {
            status: 400,
            detail: "File must be a PDF".to_string(),
        };
        assert_eq!(err.user_message(), "File must be a PDF");
    }

    #[test]
    fn user_message_falls_back_when_detail_empty() {
        let err = AppError::Api {
            status: 500,
            detail: String::new(),
        };
        assert_eq!(
            err.user_message(),
            "Request failed. Check the backend and try again."
        );
    }

    #[test]
    fn configuration_errors_are_shown_verbatim() {
        let msg = AppError::BackendNotConfigured.user_message();
        assert!(msg.contains("backend_url"));
    }
}

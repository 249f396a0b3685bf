use thiserror::Error;

/// Error taxonomy for the compliance tracker.
///
/// Validation errors are surfaced at add time and never create a queue
/// entry. Transport, server and response-format errors land on the entry
/// that triggered them and are visible in its `error` field.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Only CSV files are allowed.")]
    InvalidFileType { name: String },

    #[error("File size exceeds 10MB limit.")]
    FileTooLarge { name: String, size: u64 },

    #[error("File \"{name}\" already added.")]
    DuplicateFile { name: String },

    /// No response was received at all.
    #[error("Network error occurred")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. The message carries the
    /// response body, or a status-coded fallback when the body was empty.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A 2xx response whose body did not parse as JSON.
    #[error("Invalid server response")]
    InvalidResponse(#[from] serde_json::Error),

    /// Opaque re-signal used by the API façade: the original cause is
    /// logged, not carried.
    #[error("{message}")]
    Api { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Custom result type
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn invalid_file_type(name: &str) -> Self {
        Self::InvalidFileType {
            name: name.to_string(),
        }
    }

    pub fn file_too_large(name: &str, size: u64) -> Self {
        Self::FileTooLarge {
            name: name.to_string(),
            size,
        }
    }

    pub fn duplicate_file(name: &str) -> Self {
        Self::DuplicateFile {
            name: name.to_string(),
        }
    }

    pub fn server(status: u16, body: String) -> Self {
        let message = if body.trim().is_empty() {
            format!("Upload failed with status {}", status)
        } else {
            body
        };
        Self::Server { status, message }
    }

    pub fn api(message: &str) -> Self {
        Self::Api {
            message: message.to_string(),
        }
    }

    /// Validation errors are rejected before an entry exists; everything
    /// else settles on a specific entry.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidFileType { .. }
                | AppError::FileTooLarge { .. }
                | AppError::DuplicateFile { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_uses_body_as_message() {
        let err = AppError::server(500, "ingest failed".to_string());
        assert_eq!(err.to_string(), "ingest failed");
    }

    #[test]
    fn server_error_falls_back_to_status_code() {
        let err = AppError::server(502, String::new());
        assert_eq!(err.to_string(), "Upload failed with status 502");

        let err = AppError::server(503, "  \n".to_string());
        assert_eq!(err.to_string(), "Upload failed with status 503");
    }

    #[test]
    fn validation_classification() {
        assert!(AppError::invalid_file_type("a.txt").is_validation());
        assert!(AppError::file_too_large("a.csv", 11 << 20).is_validation());
        assert!(AppError::duplicate_file("a.csv").is_validation());
        assert!(!AppError::api("Failed to load statistics").is_validation());
        assert!(!AppError::server(404, String::new()).is_validation());
    }
}

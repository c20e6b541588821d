use thiserror::Error;

/// Raised when an API call fails (connection, timeout, or HTTP error).
///
/// Every failure mode of the backend is translated into this one shape:
/// a human-readable message plus the HTTP status code when the backend
/// answered with a non-2xx response.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_message_only() {
        let err = ApiError::with_status("Failed to fetch services: 503", 503);
        assert_eq!(err.to_string(), "Failed to fetch services: 503");
        assert_eq!(err.status, Some(503));
    }
}

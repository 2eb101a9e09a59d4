/// Result type for [`RelayerClient`] operations.
///
/// [`RelayerClient`]: crate::client::RelayerClient
pub type Result<T> = std::result::Result<T, RelayerClientError>;

/// Errors returned by the [`RelayerClient`].
///
/// These cover transport and decoding. A well-formed response with
/// `success: false` is not an error at this layer.
///
/// [`RelayerClient`]: crate::client::RelayerClient
#[derive(thiserror::Error, Debug)]
pub enum RelayerClientError {
    /// The credential was rejected.
    #[error("relayer service rejected the credential")]
    Unauthorized,
    /// The requested relayer or transaction does not exist.
    #[error("not found on relayer service")]
    NotFound,
    /// The service returned an error status without a parseable body.
    #[error("relayer service returned {status}: {body}")]
    Status {
        /// The HTTP status.
        status: reqwest::StatusCode,
        /// The raw body.
        body: String,
    },

    /// The service URL cannot carry a path.
    #[error("relayer service URL cannot be a base: {0}")]
    CannotBeABase(url::Url),
    /// An error occurred while parsing the URL.
    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// The response body did not match the expected shape.
    #[error("failed to decode relayer service response: {0}")]
    Decode(#[from] serde_json::Error),

    /// An error occurred while contacting the relayer service.
    #[error("error contacting relayer service: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl RelayerClientError {
    /// Classify an error status whose body could not be decoded.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized
            }
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => Self::Status { status, body },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn status_classification() {
        assert!(matches!(
            RelayerClientError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            RelayerClientError::Unauthorized
        ));
        assert!(matches!(
            RelayerClientError::from_status(StatusCode::NOT_FOUND, String::new()),
            RelayerClientError::NotFound
        ));
        let err = RelayerClientError::from_status(StatusCode::BAD_GATEWAY, "upstream".into());
        assert_eq!(err.to_string(), "relayer service returned 502 Bad Gateway: upstream");
    }
}

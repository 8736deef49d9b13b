//! Client-side errors for the list API.

use async_trait::async_trait;
use reqwest::Response;
use thiserror::Error;

use archive_core::AppError;

/// Failure talking to the list API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the connection failed.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    /// The API answered with a non-success status.
    #[error("list API returned {status_code}: {message}")]
    Status { status_code: u16, message: String },
    /// A request URL could not be built.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    /// The response body did not have the expected shape.
    #[error("unable to parse response from {operation}: {message}")]
    Decode { operation: &'static str, message: String },
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match &err {
            ClientError::Status {
                status_code: 404, ..
            } => AppError::not_found(err.to_string()),
            ClientError::Decode { .. } => AppError::serialization(err.to_string()),
            ClientError::InvalidUrl(_) => AppError::configuration(err.to_string()),
            _ => AppError::external_service(err.to_string()),
        }
    }
}

/// Turns non-success responses into [`ClientError::Status`].
#[async_trait]
pub trait ResponseExt {
    async fn map_client_error(self) -> Result<Response, ClientError>;
}

#[async_trait]
impl ResponseExt for Response {
    async fn map_client_error(self) -> Result<Response, ClientError> {
        if self.status().is_success() {
            return Ok(self);
        }
        Err(ClientError::Status {
            status_code: self.status().as_u16(),
            message: self.text().await.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl ResponseExt for Result<Response, reqwest::Error> {
    async fn map_client_error(self) -> Result<Response, ClientError> {
        match self {
            Ok(response) => response.map_client_error().await,
            Err(e) => Err(ClientError::Request(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archive_core::error::ErrorKind;

    #[test]
    fn test_status_mapping() {
        let not_found: AppError = ClientError::Status {
            status_code: 404,
            message: "Item does not exist".into(),
        }
        .into();
        assert_eq!(not_found.kind, ErrorKind::NotFound);

        let server: AppError = ClientError::Status {
            status_code: 503,
            message: String::new(),
        }
        .into();
        assert_eq!(server.kind, ErrorKind::ExternalService);

        let decode: AppError = ClientError::Decode {
            operation: "list_documents",
            message: "missing field".into(),
        }
        .into();
        assert_eq!(decode.kind, ErrorKind::Serialization);
    }
}

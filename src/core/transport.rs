use super::multipart::MultipartPayload;
use crate::models::attachment::ImageAttachment;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const STATUS_UNAUTHORIZED: u16 = 401;

/// Envelope returned by every backend call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

impl TransportResponse {
    pub fn ok(data: Option<serde_json::Value>) -> Self {
        Self {
            success: true,
            data,
            message: None,
            status: Some(200),
        }
    }

    pub fn failed(status: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            status: Some(status),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        !self.success && self.status == Some(STATUS_UNAUTHORIZED)
    }
}

/// The call never produced a response (network down, exception in the client).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// HTTP client collaborator. Timeouts and retries are its own business.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn save_draft(
        &self,
        payload: &MultipartPayload,
        token: Option<&str>,
    ) -> Result<TransportResponse, TransportError>;

    async fn submit(
        &self,
        payload: &MultipartPayload,
        token: Option<&str>,
    ) -> Result<TransportResponse, TransportError>;

    /// `data` holds a JSON array of `YYYY-MM-DD` strings.
    async fn list_uploaded_dates(
        &self,
        token: Option<&str>,
    ) -> Result<TransportResponse, TransportError>;

    /// `data` holds a JSON array of draft rows.
    async fn list_drafts(&self, token: Option<&str>) -> Result<TransportResponse, TransportError>;
}

/// Outcome of the device image picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSelection {
    Picked(ImageAttachment),
    Cancelled,
}

/// Camera or photo library.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn pick(&self) -> ImageSelection;
}

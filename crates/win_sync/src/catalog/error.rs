use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("response missing 'success' field, full response: {0}")]
    InvalidResponse(String),
    #[error("API reported failure, full response: {0}")]
    ErrorResponse(String),
    #[error("upload response missing usable 'url' field, full response: {0}")]
    UploadUrlMissing(String),
}

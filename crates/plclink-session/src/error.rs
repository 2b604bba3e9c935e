/// Errors from session setup and the serve loop.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Link-level error.
    #[error("transport error: {0}")]
    Transport(#[from] plclink_transport::TransportError),

    /// PDU-level error.
    #[error("wire error: {0}")]
    Wire(#[from] plclink_wire::WireError),

    /// The hello exchange failed.
    #[error("hello failed: {0}")]
    HelloFailed(String),

    /// The remote side disconnected.
    #[error("disconnected: {0}")]
    Disconnected(String),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;

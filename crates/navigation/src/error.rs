use thiserror::Error;
use tour::{GraphError, ViewpointId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unknown viewpoint `{0}`")]
    UnknownViewpoint(ViewpointId),
    #[error("transition to `{requested}` refused: `{in_flight}` is still being entered")]
    ConcurrentTransition {
        requested: ViewpointId,
        in_flight: ViewpointId,
    },
    #[error("session has not been initialized")]
    NotInitialized,
    #[error("session is already initialized")]
    AlreadyInitialized,
}

impl From<GraphError> for SessionError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::UnknownViewpoint(id) => SessionError::UnknownViewpoint(id),
        }
    }
}

/// A panorama texture could not be fetched or decoded. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load `{asset_path}`: {reason}")]
pub struct AssetLoadFailure {
    pub asset_path: String,
    pub reason: String,
}

impl AssetLoadFailure {
    pub fn new(asset_path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            asset_path: asset_path.into(),
            reason: reason.into(),
        }
    }
}

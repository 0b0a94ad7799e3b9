use ordinal_core::IdError;

/// Errors that can occur in the ECS.
#[derive(Debug, thiserror::Error)]
pub enum EcsError {
    #[error("failed to create entity: {0}")]
    Identity(#[from] IdError),
}

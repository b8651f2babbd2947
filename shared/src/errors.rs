use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown region: {0}")]
pub struct InvalidRegion(pub String);

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid grid configuration: {width}x{height} (both dimensions must be positive)")]
    InvalidConfiguration { width: i32, height: i32 },
}

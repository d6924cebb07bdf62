pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting active piece")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("grid columns must be between 4 and 1024, got {columns}")]
    InvalidColumns { columns: usize },
    #[display("grid rows must be between 4 and 1024, got {rows}")]
    InvalidRows { rows: usize },
    #[display("fall intervals must be greater than zero")]
    ZeroFallInterval,
}

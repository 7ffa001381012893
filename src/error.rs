use thiserror::Error;

pub type Result<T> = std::result::Result<T, TraderError>;

#[derive(Debug, Error)]
pub enum TraderError {
    /// Mid-price needs at least one bid level and one ask level.
    #[error("insufficient liquidity for {product}: need both bid and ask levels")]
    InsufficientLiquidity { product: String },

    #[error("failed to encode trader state: {0}")]
    StateEncode(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

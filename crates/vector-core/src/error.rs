use thiserror::Error;

#[derive(Error, Debug)]
pub enum VectorError {
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("No market data for {0}")]
    SymbolNotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),
}

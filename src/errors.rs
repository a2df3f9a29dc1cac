use crate::models::ModelKind;

/// Domain-specific error types for the pricing desk.
/// Nothing is recovered internally: every failure propagates to the caller
/// with enough context (model kind, missing field name, HTTP status) to
/// render a precise message. No partial results.
#[derive(Debug, thiserror::Error)]
pub enum PricerError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid option type: {0:?} (expected call or put)")]
    InvalidOptionType(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("spark API error: {status} {body}")]
    SparkApi { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("missing output field: {0}")]
    MissingField(String),

    #[error("market data error: {0}")]
    MarketData(String),

    #[error("{model} pricing failed: {source}")]
    Model {
        model: ModelKind,
        #[source]
        source: Box<PricerError>,
    },
}

impl PricerError {
    /// Attach the model identity for diagnostics. Already-wrapped errors
    /// pass through unchanged so the context never stacks.
    pub fn for_model(self, model: ModelKind) -> Self {
        match self {
            e @ PricerError::Model { .. } => e,
            e => PricerError::Model {
                model,
                source: Box::new(e),
            },
        }
    }

    /// The underlying failure, stripped of any model context.
    pub fn root(&self) -> &PricerError {
        match self {
            PricerError::Model { source, .. } => source.root(),
            e => e,
        }
    }
}

impl From<reqwest::Error> for PricerError {
    fn from(e: reqwest::Error) -> Self {
        PricerError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for PricerError {
    fn from(e: serde_json::Error) -> Self {
        PricerError::MalformedResponse(e.to_string())
    }
}

pub type PricerResult<T> = Result<T, PricerError>;

use crate::models::{ModelKind, OptionType, PricingParameters, PricingResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One computed pricing query with its inputs, kept for display.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    pub id: String,
    pub model: ModelKind,
    pub option_type: OptionType,
    /// Set when the spot came from a market-data lookup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    pub parameters: PricingParameters,
    pub result: PricingResult,
    pub timestamp: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(
        model: ModelKind,
        option_type: OptionType,
        ticker: Option<String>,
        parameters: PricingParameters,
        result: PricingResult,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            model,
            option_type,
            ticker,
            parameters,
            result,
            timestamp: Utc::now(),
        }
    }
}

/// Append-only session log of pricing queries, oldest first. Owned by the
/// session state and passed by reference; it lives exactly as long as the
/// session and has no removal or eviction.
#[derive(Debug, Default)]
pub struct HistoryLedger {
    records: Vec<HistoryRecord>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    /// Insertion order, oldest first.
    pub fn all(&self) -> &[HistoryRecord] {
        &self.records
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

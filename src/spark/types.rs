use serde::{Deserialize, Serialize};

// ── Requests ──

/// Coordinates of one remote Execute service: folder-relative service name
/// plus the pinned version id carried in the request meta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointRef {
    pub service: &'static str,
    pub version_id: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestPayload {
    pub request_data: RequestData,
    pub request_meta: RequestMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestData {
    pub inputs: ModelInputs,
}

/// Per-model input blocks. Field names are the remote service's contract and
/// must not drift; serde renames pin the exact wire spelling.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ModelInputs {
    BlackScholes {
        #[serde(rename = "ExercisePrice")]
        exercise_price: f64,
        #[serde(rename = "RisklessRate")]
        riskless_rate: f64,
        #[serde(rename = "StdDev")]
        std_dev: f64,
        #[serde(rename = "StockPrice")]
        stock_price: f64,
        /// Years: day count / 365.
        #[serde(rename = "TimeToExpiry")]
        time_to_expiry: f64,
    },
    MonteCarlo {
        /// Raw day count, not years. The remote service expects days here.
        daystoexpire: u32,
        #[serde(rename = "numSimulations")]
        num_simulations: u32,
        historicvolatility: f64,
        price: f64,
        riskfreerate: f64,
        strikeprice: f64,
    },
    Binomial {
        /// Raw day count, same convention as Monte Carlo.
        daystoexpire: u32,
        numtimesteps: u32,
        volatility: f64,
        price: f64,
        riskfreerate: f64,
        strikeprice: f64,
        /// "Call" or "Put"; the tree endpoint prices one side per call.
        optiontype: String,
    },
}

/// Fixed correlation/versioning envelope sent with every request.
#[derive(Debug, Clone, Serialize)]
pub struct RequestMeta {
    pub version_id: String,
    pub call_purpose: String,
    pub source_system: String,
    pub correlation_id: String,
    /// Always null: no requested-output filter.
    pub requested_output: Option<String>,
    pub service_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_type: Option<String>,
}

// ── Responses ──

/// Raw remote response envelope. Transient: discarded after normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceEnvelope {
    pub response_data: ResponseData,
    #[allow(dead_code)]
    #[serde(default)]
    pub response_meta: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseData {
    pub outputs: serde_json::Map<String, serde_json::Value>,
}

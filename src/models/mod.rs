pub mod binomial;
pub mod black_scholes;
pub mod monte_carlo;

use crate::errors::{PricerError, PricerResult};
use serde::{Deserialize, Serialize};

/// Which remote pricing service a request targets. Each kind carries its own
/// field-name mapping and pinned endpoint version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    BlackScholes,
    MonteCarlo,
    Binomial,
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlackScholes => write!(f, "Black-Scholes"),
            Self::MonteCarlo => write!(f, "Monte Carlo"),
            Self::Binomial => write!(f, "Binomial"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Parse boundary text ("call", "Put Option", ...) before anything else
    /// runs, so a bad option type never reaches the network.
    pub fn parse(raw: &str) -> PricerResult<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "call" | "call option" => Ok(Self::Call),
            "put" | "put option" => Ok(Self::Put),
            _ => Err(PricerError::InvalidOptionType(raw.to_string())),
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "Call"),
            Self::Put => write!(f, "Put"),
        }
    }
}

/// Inputs for one pricing request. Immutable once constructed; owned by the
/// caller for the duration of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingParameters {
    pub spot_price: f64,
    pub strike_price: f64,
    pub days_to_maturity: u32,
    /// Fraction, not percent: 0.10 means 10%.
    pub risk_free_rate: f64,
    /// Annualized sigma as a fraction.
    pub volatility: f64,
    /// Monte Carlo only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_count: Option<u32>,
    /// Binomial only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_step_count: Option<u32>,
}

impl PricingParameters {
    pub fn validate(&self, model: ModelKind) -> PricerResult<()> {
        if !self.spot_price.is_finite() || self.spot_price <= 0.0 {
            return Err(PricerError::Validation(format!(
                "spot_price must be finite and positive, got {}",
                self.spot_price
            )));
        }
        if !self.strike_price.is_finite() || self.strike_price <= 0.0 {
            return Err(PricerError::Validation(format!(
                "strike_price must be finite and positive, got {}",
                self.strike_price
            )));
        }
        if self.days_to_maturity < 1 {
            return Err(PricerError::Validation(
                "days_to_maturity must be at least 1".into(),
            ));
        }
        if !self.risk_free_rate.is_finite() || !(0.0..=1.0).contains(&self.risk_free_rate) {
            return Err(PricerError::Validation(format!(
                "risk_free_rate must be within [0, 1], got {}",
                self.risk_free_rate
            )));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(PricerError::Validation(format!(
                "volatility must be finite and non-negative, got {}",
                self.volatility
            )));
        }

        match model {
            ModelKind::BlackScholes => {}
            ModelKind::MonteCarlo => match self.simulation_count {
                Some(n) if n > 0 => {}
                Some(_) => {
                    return Err(PricerError::Validation(
                        "simulation_count must be strictly positive".into(),
                    ))
                }
                None => {
                    return Err(PricerError::Validation(
                        "simulation_count is required for Monte Carlo".into(),
                    ))
                }
            },
            ModelKind::Binomial => match self.time_step_count {
                Some(n) if n > 0 => {}
                Some(_) => {
                    return Err(PricerError::Validation(
                        "time_step_count must be strictly positive".into(),
                    ))
                }
                None => {
                    return Err(PricerError::Validation(
                        "time_step_count is required for Binomial".into(),
                    ))
                }
            },
        }

        Ok(())
    }
}

/// Option price sensitivities, Black-Scholes only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

/// Stable per-model result record. Both sides of the contract always come
/// back; the option type only selects which one is surfaced as the premium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub call_price: f64,
    pub put_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeks: Option<Greeks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_paths: Option<Vec<Vec<f64>>>,
}

impl PricingResult {
    #[inline]
    pub fn premium(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call_price,
            OptionType::Put => self.put_price,
        }
    }
}

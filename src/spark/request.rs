use super::types::{EndpointRef, ModelInputs, RequestData, RequestMeta, RequestPayload};
use crate::errors::PricerResult;
use crate::models::{ModelKind, OptionType, PricingParameters};

pub const BLACK_SCHOLES: EndpointRef = EndpointRef {
    service: "BlackScholes",
    version_id: "49294d02-b796-4966-8d2f-c76193ebad6b",
};

pub const MONTE_CARLO: EndpointRef = EndpointRef {
    service: "MonteCarloSimulation",
    version_id: "4d5274e8-9b0d-49f6-873e-536537b237be",
};

pub const BINOMIAL: EndpointRef = EndpointRef {
    service: "BinomialTree",
    version_id: "7b1f3a44-5c0e-4f8a-9d26-0b8e4f1f2a9c",
};

const CALL_PURPOSE: &str = "Spark - API Tester";
const SOURCE_SYSTEM: &str = "SPARK";
/// The Monte Carlo endpoint version additionally tags its compiler type.
const MC_COMPILER_TYPE: &str = "Type3";

fn meta(endpoint: EndpointRef, compiler_type: Option<&str>) -> RequestMeta {
    RequestMeta {
        version_id: endpoint.version_id.to_string(),
        call_purpose: CALL_PURPOSE.to_string(),
        source_system: SOURCE_SYSTEM.to_string(),
        correlation_id: String::new(),
        requested_output: None,
        service_category: String::new(),
        compiler_type: compiler_type.map(str::to_string),
    }
}

/// Black-Scholes payload. The only model that converts the day count to
/// years (days / 365); the others pass raw days and the remote side owns the
/// conversion. Do not "fix" this asymmetry: it is the services' contract.
pub fn black_scholes(params: &PricingParameters) -> PricerResult<RequestPayload> {
    params.validate(ModelKind::BlackScholes)?;

    Ok(RequestPayload {
        request_data: RequestData {
            inputs: ModelInputs::BlackScholes {
                exercise_price: params.strike_price,
                riskless_rate: params.risk_free_rate,
                std_dev: params.volatility,
                stock_price: params.spot_price,
                time_to_expiry: f64::from(params.days_to_maturity) / 365.0,
            },
        },
        request_meta: meta(BLACK_SCHOLES, None),
    })
}

pub fn monte_carlo(params: &PricingParameters) -> PricerResult<RequestPayload> {
    params.validate(ModelKind::MonteCarlo)?;

    // validate() guarantees the count is present
    let num_simulations = params.simulation_count.unwrap_or_default();

    Ok(RequestPayload {
        request_data: RequestData {
            inputs: ModelInputs::MonteCarlo {
                daystoexpire: params.days_to_maturity,
                num_simulations,
                historicvolatility: params.volatility,
                price: params.spot_price,
                riskfreerate: params.risk_free_rate,
                strikeprice: params.strike_price,
            },
        },
        request_meta: meta(MONTE_CARLO, Some(MC_COMPILER_TYPE)),
    })
}

/// The tree endpoint prices one side per call, so the payload carries the
/// option type and the facade issues one request per side.
pub fn binomial(params: &PricingParameters, option_type: OptionType) -> PricerResult<RequestPayload> {
    params.validate(ModelKind::Binomial)?;

    let numtimesteps = params.time_step_count.unwrap_or_default();

    Ok(RequestPayload {
        request_data: RequestData {
            inputs: ModelInputs::Binomial {
                daystoexpire: params.days_to_maturity,
                numtimesteps,
                volatility: params.volatility,
                price: params.spot_price,
                riskfreerate: params.risk_free_rate,
                strikeprice: params.strike_price,
                optiontype: option_type.to_string(),
            },
        },
        request_meta: meta(BINOMIAL, None),
    })
}

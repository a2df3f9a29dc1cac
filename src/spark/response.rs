use super::types::ServiceEnvelope;
use crate::errors::{PricerError, PricerResult};
use crate::models::{Greeks, PricingResult};
use serde_json::{Map, Value};

// Per-model output alias tables. The endpoints disagree on key casing
// between versions, so every lookup goes through one canonical key (first
// entry, also the name reported when missing) plus its accepted variants.
const CALL_PRICE: &[&str] = &["callprice", "CallPrice", "callPrice"];
const PUT_PRICE: &[&str] = &["putprice", "PutPrice", "putPrice"];
const OPTION_PRICE: &[&str] = &["optionprice", "OptionPrice"];
const SIMULATIONS: &[&str] = &["simulations", "Simulations", "paths"];

const DELTA: &[&str] = &["Delta", "delta"];
const GAMMA: &[&str] = &["Gamma", "gamma"];
const THETA: &[&str] = &["Theta", "theta"];
const VEGA: &[&str] = &["Vega", "vega"];
const RHO: &[&str] = &["Rho", "rho"];

/// Black-Scholes: both prices plus the five greeks, all required. A missing
/// greek is a contract violation, never a zero.
pub fn black_scholes(envelope: &ServiceEnvelope) -> PricerResult<PricingResult> {
    let outputs = &envelope.response_data.outputs;

    Ok(PricingResult {
        call_price: required_f64(outputs, CALL_PRICE)?,
        put_price: required_f64(outputs, PUT_PRICE)?,
        greeks: Some(Greeks {
            delta: required_f64(outputs, DELTA)?,
            gamma: required_f64(outputs, GAMMA)?,
            theta: required_f64(outputs, THETA)?,
            vega: required_f64(outputs, VEGA)?,
            rho: required_f64(outputs, RHO)?,
        }),
        simulation_paths: None,
    })
}

/// Monte Carlo: both prices required, simulation table optional.
pub fn monte_carlo(envelope: &ServiceEnvelope) -> PricerResult<PricingResult> {
    let outputs = &envelope.response_data.outputs;

    let simulation_paths = match lookup(outputs, SIMULATIONS) {
        Some(value) => Some(parse_paths(value)?),
        None => None,
    };

    Ok(PricingResult {
        call_price: required_f64(outputs, CALL_PRICE)?,
        put_price: required_f64(outputs, PUT_PRICE)?,
        greeks: None,
        simulation_paths,
    })
}

/// Binomial: one price per call; the facade combines the two sides.
pub fn binomial_price(envelope: &ServiceEnvelope) -> PricerResult<f64> {
    required_f64(&envelope.response_data.outputs, OPTION_PRICE)
}

fn lookup<'a>(outputs: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|key| outputs.get(*key))
}

fn required_f64(outputs: &Map<String, Value>, aliases: &[&str]) -> PricerResult<f64> {
    let value = lookup(outputs, aliases)
        .ok_or_else(|| PricerError::MissingField(aliases[0].to_string()))?;
    as_f64(value).ok_or_else(|| {
        PricerError::MalformedResponse(format!("field {} is not numeric: {value}", aliases[0]))
    })
}

// Some endpoint versions emit numbers as JSON strings
fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_paths(value: &Value) -> PricerResult<Vec<Vec<f64>>> {
    let rows = value.as_array().ok_or_else(|| {
        PricerError::MalformedResponse(format!("simulation table is not an array: {value}"))
    })?;

    // Either a table of paths or a single flat path
    if rows.iter().all(|row| row.is_array()) {
        let mut table = Vec::with_capacity(rows.len());
        for row in rows {
            table.push(numeric_row(row.as_array().map_or(&[], Vec::as_slice))?);
        }
        Ok(table)
    } else {
        Ok(vec![numeric_row(rows)?])
    }
}

fn numeric_row(values: &[Value]) -> PricerResult<Vec<f64>> {
    values
        .iter()
        .map(|v| {
            as_f64(v).ok_or_else(|| {
                PricerError::MalformedResponse(format!("non-numeric simulation entry: {v}"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(outputs: &str) -> ServiceEnvelope {
        let body = format!(r#"{{"response_data":{{"outputs":{outputs}}}}}"#);
        serde_json::from_str(&body).expect("test envelope")
    }

    #[test]
    fn test_black_scholes_extracts_all_fields() {
        let env = envelope(
            r#"{"callprice":0.0,"putprice":152.3,"Delta":0.01,"Gamma":0.0,
                "Theta":-0.05,"Vega":0.10,"Rho":0.02}"#,
        );
        let result = black_scholes(&env).unwrap();

        assert_eq!(result.call_price, 0.0);
        assert_eq!(result.put_price, 152.3);
        let greeks = result.greeks.unwrap();
        assert_eq!(greeks.delta, 0.01);
        assert_eq!(greeks.gamma, 0.0);
        assert_eq!(greeks.theta, -0.05);
        assert_eq!(greeks.vega, 0.10);
        assert_eq!(greeks.rho, 0.02);
        assert!(result.simulation_paths.is_none());
    }

    #[test]
    fn test_missing_greek_names_the_field() {
        let env = envelope(
            r#"{"callprice":1.0,"putprice":2.0,"Delta":0.5,"Gamma":0.1,
                "Theta":-0.05,"Rho":0.02}"#,
        );
        let err = black_scholes(&env).unwrap_err();
        assert!(matches!(err, PricerError::MissingField(f) if f == "Vega"));
    }

    #[test]
    fn test_missing_price_is_never_defaulted() {
        let env = envelope(r#"{"putprice":2.0}"#);
        let err = monte_carlo(&env).unwrap_err();
        assert!(matches!(err, PricerError::MissingField(f) if f == "callprice"));
    }

    #[test]
    fn test_monte_carlo_accepts_either_casing() {
        let lower = monte_carlo(&envelope(r#"{"callprice":3.5,"putprice":7.25}"#)).unwrap();
        assert_eq!(lower.call_price, 3.5);
        assert_eq!(lower.put_price, 7.25);

        let upper = monte_carlo(&envelope(r#"{"CallPrice":3.5,"PutPrice":7.25}"#)).unwrap();
        assert_eq!(upper.call_price, 3.5);
        assert_eq!(upper.put_price, 7.25);
    }

    #[test]
    fn test_monte_carlo_simulations_are_optional() {
        let without = monte_carlo(&envelope(r#"{"callprice":1.0,"putprice":2.0}"#)).unwrap();
        assert!(without.simulation_paths.is_none());

        let with = monte_carlo(&envelope(
            r#"{"callprice":1.0,"putprice":2.0,
                "simulations":[[100.0,101.5],[100.0,98.2]]}"#,
        ))
        .unwrap();
        assert_eq!(
            with.simulation_paths.unwrap(),
            vec![vec![100.0, 101.5], vec![100.0, 98.2]]
        );
    }

    #[test]
    fn test_flat_simulation_array_becomes_one_path() {
        let result = monte_carlo(&envelope(
            r#"{"callprice":1.0,"putprice":2.0,"simulations":[100.0,101.5,99.8]}"#,
        ))
        .unwrap();
        assert_eq!(
            result.simulation_paths.unwrap(),
            vec![vec![100.0, 101.5, 99.8]]
        );
    }

    #[test]
    fn test_binomial_price_extraction() {
        assert_eq!(
            binomial_price(&envelope(r#"{"optionprice":12.75}"#)).unwrap(),
            12.75
        );
        assert_eq!(
            binomial_price(&envelope(r#"{"OptionPrice":12.75}"#)).unwrap(),
            12.75
        );

        let err = binomial_price(&envelope(r#"{"something_else":1}"#)).unwrap_err();
        assert!(matches!(err, PricerError::MissingField(f) if f == "optionprice"));
    }

    #[test]
    fn test_stringly_typed_numbers_are_accepted() {
        let result = monte_carlo(&envelope(r#"{"callprice":"3.5","putprice":"7.25"}"#)).unwrap();
        assert_eq!(result.call_price, 3.5);
        assert_eq!(result.put_price, 7.25);
    }

    #[test]
    fn test_non_numeric_price_is_malformed() {
        let err = monte_carlo(&envelope(r#"{"callprice":true,"putprice":2.0}"#)).unwrap_err();
        assert!(matches!(err, PricerError::MalformedResponse(_)));
    }
}

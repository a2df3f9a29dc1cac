use crate::errors::PricerResult;
use crate::models::{ModelKind, OptionType, PricingParameters, PricingResult};
use crate::spark::client::SparkClient;
use crate::spark::{request, response};

/// Black-Scholes facade. Parameters are bound at construction; every
/// `price` call issues a fresh remote execution. One call returns both
/// prices and the five greeks.
#[derive(Debug, Clone)]
pub struct BlackScholes {
    params: PricingParameters,
}

impl BlackScholes {
    pub fn new(params: PricingParameters) -> Self {
        Self { params }
    }

    pub async fn price(
        &self,
        client: &SparkClient,
        option_type: OptionType,
    ) -> PricerResult<PricingResult> {
        let wrap = |e: crate::errors::PricerError| e.for_model(ModelKind::BlackScholes);

        let payload = request::black_scholes(&self.params).map_err(wrap)?;
        let envelope = client
            .execute(&request::BLACK_SCHOLES, &payload)
            .await
            .map_err(wrap)?;
        let result = response::black_scholes(&envelope).map_err(wrap)?;

        tracing::debug!(
            option = %option_type,
            premium = result.premium(option_type),
            "Black-Scholes priced"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PricerError;
    use crate::testutil::spawn_stub;
    use std::time::Duration;

    fn spark(base_url: &str) -> SparkClient {
        SparkClient::new(base_url, "Test Folder", "tenant", "key", Duration::from_secs(5))
    }

    fn params() -> PricingParameters {
        PricingParameters {
            spot_price: 150.0,
            strike_price: 300.0,
            days_to_maturity: 365,
            risk_free_rate: 0.10,
            volatility: 0.20,
            simulation_count: None,
            time_step_count: None,
        }
    }

    #[tokio::test]
    async fn test_price_matches_stub_outputs_exactly() {
        let url = spawn_stub(
            200,
            r#"{"response_data":{"outputs":{
                "callprice":0.0,"putprice":152.3,
                "Delta":0.01,"Gamma":0.0,"Theta":-0.05,"Vega":0.10,"Rho":0.02}}}"#,
        )
        .await;

        let result = BlackScholes::new(params())
            .price(&spark(&url), OptionType::Call)
            .await
            .unwrap();

        assert_eq!(result.call_price, 0.0);
        assert_eq!(result.put_price, 152.3);
        assert_eq!(result.premium(OptionType::Put), 152.3);
        let greeks = result.greeks.unwrap();
        assert_eq!(
            (greeks.delta, greeks.gamma, greeks.theta, greeks.vega, greeks.rho),
            (0.01, 0.0, -0.05, 0.10, 0.02)
        );
    }

    #[tokio::test]
    async fn test_failures_carry_the_model_identity() {
        let url = spawn_stub(200, r#"{"response_data":{"outputs":{"putprice":1.0}}}"#).await;

        let err = BlackScholes::new(params())
            .price(&spark(&url), OptionType::Call)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PricerError::Model { model: ModelKind::BlackScholes, .. }
        ));
        assert!(matches!(err.root(), PricerError::MissingField(f) if f == "callprice"));
    }

    #[tokio::test]
    async fn test_invalid_parameters_fail_before_any_network_call() {
        let mut p = params();
        p.volatility = -1.0;

        // Nothing listens here; a network attempt would surface as Network
        let err = BlackScholes::new(p)
            .price(&spark("http://127.0.0.1:9"), OptionType::Call)
            .await
            .unwrap_err();
        assert!(matches!(err.root(), PricerError::Validation(_)));
    }
}

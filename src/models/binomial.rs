use crate::errors::{PricerError, PricerResult};
use crate::models::{ModelKind, OptionType, PricingParameters, PricingResult};
use crate::spark::client::SparkClient;
use crate::spark::{request, response};

/// Binomial-tree facade. The tree endpoint prices one side per call, so a
/// full result takes two sequential remote executions, one per option type.
#[derive(Debug, Clone)]
pub struct Binomial {
    params: PricingParameters,
}

impl Binomial {
    pub fn new(params: PricingParameters) -> Self {
        Self { params }
    }

    pub async fn price(
        &self,
        client: &SparkClient,
        option_type: OptionType,
    ) -> PricerResult<PricingResult> {
        let call_price = self.leg(client, OptionType::Call).await?;
        let put_price = self.leg(client, OptionType::Put).await?;

        let result = PricingResult {
            call_price,
            put_price,
            greeks: None,
            simulation_paths: None,
        };

        tracing::debug!(
            option = %option_type,
            premium = result.premium(option_type),
            "Binomial priced"
        );
        Ok(result)
    }

    async fn leg(&self, client: &SparkClient, side: OptionType) -> PricerResult<f64> {
        let wrap = |e: PricerError| e.for_model(ModelKind::Binomial);

        let payload = request::binomial(&self.params, side).map_err(wrap)?;
        let envelope = client
            .execute(&request::BINOMIAL, &payload)
            .await
            .map_err(wrap)?;
        response::binomial_price(&envelope).map_err(wrap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::spawn_stub_seq;
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
            time_step_count: Some(15_000),
        }
    }

    #[tokio::test]
    async fn test_price_combines_two_remote_calls() {
        // Call leg first, put leg second
        let url = spawn_stub_seq(vec![
            (
                200,
                r#"{"response_data":{"outputs":{"optionprice":7.11}}}"#.to_string(),
            ),
            (
                200,
                r#"{"response_data":{"outputs":{"optionprice":129.4}}}"#.to_string(),
            ),
        ])
        .await;

        let result = Binomial::new(params())
            .price(&spark(&url), OptionType::Call)
            .await
            .unwrap();

        assert_eq!(result.call_price, 7.11);
        assert_eq!(result.put_price, 129.4);
        assert!(result.greeks.is_none());
        assert!(result.simulation_paths.is_none());
    }

    #[tokio::test]
    async fn test_second_leg_failure_propagates() {
        let url = spawn_stub_seq(vec![
            (
                200,
                r#"{"response_data":{"outputs":{"optionprice":7.11}}}"#.to_string(),
            ),
            (503, "try later".to_string()),
        ])
        .await;

        let err = Binomial::new(params())
            .price(&spark(&url), OptionType::Put)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PricerError::Model { model: ModelKind::Binomial, .. }
        ));
        assert!(matches!(
            err.root(),
            PricerError::SparkApi { status: 503, .. }
        ));
    }
}

use crate::errors::PricerResult;
use crate::models::{ModelKind, OptionType, PricingParameters, PricingResult};
use crate::spark::client::SparkClient;
use crate::spark::{request, response};

/// Monte Carlo facade. One remote call returns both prices and, on endpoint
/// versions that emit it, the simulated price paths. Re-pricing the same
/// parameters may return different numbers: the remote simulation is not
/// deterministic.
#[derive(Debug, Clone)]
pub struct MonteCarlo {
    params: PricingParameters,
}

impl MonteCarlo {
    pub fn new(params: PricingParameters) -> Self {
        Self { params }
    }

    pub async fn price(
        &self,
        client: &SparkClient,
        option_type: OptionType,
    ) -> PricerResult<PricingResult> {
        let wrap = |e: crate::errors::PricerError| e.for_model(ModelKind::MonteCarlo);

        let payload = request::monte_carlo(&self.params).map_err(wrap)?;
        let envelope = client
            .execute(&request::MONTE_CARLO, &payload)
            .await
            .map_err(wrap)?;
        let result = response::monte_carlo(&envelope).map_err(wrap)?;

        tracing::debug!(
            option = %option_type,
            premium = result.premium(option_type),
            paths = result.simulation_paths.as_ref().map_or(0, Vec::len),
            "Monte Carlo priced"
        );
        Ok(result)
    }
}

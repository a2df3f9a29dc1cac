use crate::errors::{PricerError, PricerResult};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub spark_tenant: String,
    pub spark_api_key: String,
    pub spark_base_url: String,
    pub spark_folder: String,
    pub market_data_base_url: String,
    pub http_timeout_secs: u64,
    pub server_port: u16,
}

impl AppConfig {
    /// Credentials have no baked-in defaults: a missing tenant or key is a
    /// startup failure, not a silently unauthenticated client.
    pub fn from_env() -> PricerResult<Self> {
        dotenvy::dotenv().ok();

        let http_timeout_secs = env_var_or("HTTP_TIMEOUT_SECS", "15")
            .parse::<u64>()
            .map_err(|e| PricerError::Config(format!("HTTP_TIMEOUT_SECS: {e}")))?;

        let server_port = env_var_or("SERVER_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| PricerError::Config(format!("SERVER_PORT: {e}")))?;

        Ok(Self {
            spark_tenant: env_var("SPARK_TENANT_NAME")?,
            spark_api_key: env_var("SPARK_API_KEY")?,
            spark_base_url: env_var_or(
                "SPARK_BASE_URL",
                "https://excel.staging.coherent.global/coherent/api/v3",
            ),
            spark_folder: env_var_or("SPARK_FOLDER", "Microsoft Envision"),
            market_data_base_url: env_var_or(
                "MARKET_DATA_BASE_URL",
                "https://query1.finance.yahoo.com",
            ),
            http_timeout_secs,
            server_port,
        })
    }
}

fn env_var(key: &str) -> PricerResult<String> {
    std::env::var(key).map_err(|_| PricerError::Config(format!("missing env var: {key}")))
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

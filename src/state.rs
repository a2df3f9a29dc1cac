use crate::config::AppConfig;
use crate::feeds::market_data::MarketDataClient;
use crate::history::HistoryLedger;
use crate::spark::client::SparkClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Application shared state. The history ledger is owned here, scoped to
/// this process's single interactive session, and reached only through the
/// Arc handed to the handlers; it is never module-level.
pub struct AppState {
    pub config: AppConfig,
    pub spark: SparkClient,
    pub market_data: MarketDataClient,
    pub history: Mutex<HistoryLedger>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);

        let spark = SparkClient::new(
            &config.spark_base_url,
            &config.spark_folder,
            &config.spark_tenant,
            &config.spark_api_key,
            timeout,
        );
        let market_data = MarketDataClient::new(&config.market_data_base_url, timeout);

        Arc::new(Self {
            config,
            spark,
            market_data,
            history: Mutex::new(HistoryLedger::new()),
        })
    }
}

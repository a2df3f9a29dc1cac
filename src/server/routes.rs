use crate::errors::{PricerError, PricerResult};
use crate::history::HistoryRecord;
use crate::models::binomial::Binomial;
use crate::models::black_scholes::BlackScholes;
use crate::models::monte_carlo::MonteCarlo;
use crate::models::{ModelKind, OptionType, PricingParameters};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

/// Form-shaped pricing request. Rates come in as percentages and maturity
/// as an exercise date, the way the interaction surface collects them; the
/// handler converts before the core sees the values.
#[derive(Debug, serde::Deserialize)]
pub struct PriceRequest {
    pub model: ModelKind,
    pub option_type: String,
    pub ticker: Option<String>,
    /// Overrides the market-data lookup when supplied directly.
    pub spot_price: Option<f64>,
    pub strike_price: f64,
    /// Percent: 10 means 10%.
    pub risk_free_rate_pct: f64,
    /// Percent: 20 means 20%.
    pub volatility_pct: f64,
    /// ISO date, at least one day in the future.
    pub exercise_date: NaiveDate,
    pub simulation_count: Option<u32>,
    pub time_step_count: Option<u32>,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

/// GET /api/health
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "spark_folder": state.config.spark_folder,
    }))
}

/// POST /api/price -- one full pricing interaction: optional spot lookup,
/// remote pricing call(s), normalization, history append.
pub async fn post_price(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PriceRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match run_pricing(&state, req).await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            tracing::warn!(error = %e, "pricing request failed");
            Err(error_response(&e))
        }
    }
}

/// GET /api/history -- session ledger, oldest first
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let history = state.history.lock().await;
    Json(serde_json::json!({
        "count": history.len(),
        "records": history.all(),
    }))
}

/// GET /api/spot/{ticker} -- historical series and the spot derived from it
pub async fn get_spot(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let history = state
        .market_data
        .fetch_history(&ticker)
        .await
        .map_err(|e| error_response(&e))?;
    let spot_price = history.last_price().map_err(|e| error_response(&e))?;

    // The UI only charts the recent tail
    let tail_start = history.points.len().saturating_sub(50);
    Ok(Json(serde_json::json!({
        "ticker": history.ticker,
        "spot_price": spot_price,
        "points": &history.points[tail_start..],
    })))
}

async fn run_pricing(state: &AppState, req: PriceRequest) -> PricerResult<serde_json::Value> {
    // Parse the option type first: a bad one must never reach the network
    let option_type = OptionType::parse(&req.option_type)?;

    let (spot_price, ticker) = match (req.spot_price, req.ticker.as_deref()) {
        (Some(spot), _) => (spot, req.ticker.clone()),
        (None, Some(ticker)) => {
            let history = state.market_data.fetch_history(ticker).await?;
            (history.last_price()?, Some(ticker.to_string()))
        }
        (None, None) => {
            return Err(PricerError::Validation(
                "either spot_price or ticker is required".into(),
            ))
        }
    };

    let params = to_parameters(&req, spot_price, days_until(req.exercise_date)?);

    tracing::info!(
        model = %req.model,
        option = %option_type,
        ticker = ticker.as_deref().unwrap_or("-"),
        spot = spot_price,
        strike = params.strike_price,
        "pricing request"
    );

    let result = match req.model {
        ModelKind::BlackScholes => {
            BlackScholes::new(params.clone())
                .price(&state.spark, option_type)
                .await?
        }
        ModelKind::MonteCarlo => {
            MonteCarlo::new(params.clone())
                .price(&state.spark, option_type)
                .await?
        }
        ModelKind::Binomial => {
            Binomial::new(params.clone())
                .price(&state.spark, option_type)
                .await?
        }
    };

    let premium = result.premium(option_type);
    let record = HistoryRecord::new(req.model, option_type, ticker, params, result);
    let body = serde_json::json!({ "premium": premium, "record": &record });

    state.history.lock().await.append(record);
    Ok(body)
}

fn to_parameters(req: &PriceRequest, spot_price: f64, days_to_maturity: u32) -> PricingParameters {
    PricingParameters {
        spot_price,
        strike_price: req.strike_price,
        days_to_maturity,
        risk_free_rate: req.risk_free_rate_pct / 100.0,
        volatility: req.volatility_pct / 100.0,
        simulation_count: req.simulation_count,
        time_step_count: req.time_step_count,
    }
}

fn days_until(exercise_date: NaiveDate) -> PricerResult<u32> {
    let today = Utc::now().date_naive();
    let days = (exercise_date - today).num_days();
    if days < 1 {
        return Err(PricerError::Validation(format!(
            "exercise date {exercise_date} must be at least one day in the future"
        )));
    }
    Ok(days as u32)
}

fn error_response(e: &PricerError) -> ApiError {
    let status = match e.root() {
        PricerError::Validation(_) | PricerError::InvalidOptionType(_) => StatusCode::BAD_REQUEST,
        PricerError::Network(_)
        | PricerError::SparkApi { .. }
        | PricerError::MalformedResponse(_)
        | PricerError::MissingField(_)
        | PricerError::MarketData(_) => StatusCode::BAD_GATEWAY,
        PricerError::Config(_) | PricerError::Model { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": e.to_string() })))
}

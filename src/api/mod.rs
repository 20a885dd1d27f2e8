use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    ApplicableStrategies, CATALOG, DEFAULT_TAX_RATE_PERCENT, ForecastResult,
    ImplementationProgress, ImplementationSummary, IncomeType, MAX_HORIZON_YEARS, RealEstateStatus,
    UserProfile, compute_forecast, generate_plan, select_applicable, summarize,
};
use crate::error::{CommandError, ProfileError};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliRealEstateStatus {
    None,
    Ltr,
    Str,
    Reps,
    Interested,
}

impl From<CliRealEstateStatus> for RealEstateStatus {
    fn from(value: CliRealEstateStatus) -> Self {
        match value {
            CliRealEstateStatus::None => RealEstateStatus::None,
            CliRealEstateStatus::Ltr => RealEstateStatus::Ltr,
            CliRealEstateStatus::Str => RealEstateStatus::Str,
            CliRealEstateStatus::Reps => RealEstateStatus::Reps,
            CliRealEstateStatus::Interested => RealEstateStatus::Interested,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiRealEstateStatus {
    None,
    #[serde(alias = "long-term-rentals", alias = "longTermRentals")]
    Ltr,
    #[serde(alias = "short-term-rentals", alias = "shortTermRentals")]
    Str,
    Reps,
    Interested,
}

impl From<ApiRealEstateStatus> for CliRealEstateStatus {
    fn from(value: ApiRealEstateStatus) -> Self {
        match value {
            ApiRealEstateStatus::None => CliRealEstateStatus::None,
            ApiRealEstateStatus::Ltr => CliRealEstateStatus::Ltr,
            ApiRealEstateStatus::Str => CliRealEstateStatus::Str,
            ApiRealEstateStatus::Reps => CliRealEstateStatus::Reps,
            ApiRealEstateStatus::Interested => CliRealEstateStatus::Interested,
        }
    }
}

/// Wizard form fields. Older form revisions used different names for the
/// same values, which are accepted as aliases.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProfilePayload {
    income_type: Option<String>,
    #[serde(alias = "income")]
    annual_income: Option<f64>,
    #[serde(alias = "currentTaxRate", alias = "taxRate")]
    current_tax_rate_percent: Option<f64>,
    #[serde(alias = "returnRate")]
    return_rate_percent: Option<f64>,
    #[serde(alias = "timeHorizon", alias = "forecastTimeHorizon")]
    time_horizon_years: Option<u32>,
    #[serde(alias = "reinvestTaxSavings", alias = "reinvestmentEnabled")]
    reinvest_enabled: Option<bool>,
    real_estate_status: Option<ApiRealEstateStatus>,
    #[serde(alias = "selectedStrategies")]
    selected_strategy_ids: Option<Vec<String>>,
    implementation_progress: Option<BTreeMap<String, u32>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StrategiesPayload {
    income_type: Option<String>,
    #[serde(alias = "income")]
    annual_income: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProgressPayload {
    #[serde(alias = "selectedStrategies")]
    selected_strategy_ids: Vec<String>,
    implementation_progress: BTreeMap<String, u32>,
    complete_step: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "escape-plan",
    about = "Tax escape plan forecaster: strategy selection and compounding savings projection"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Print the forecast for a profile as JSON
    Forecast(ProfileArgs),
    /// Print the strategies a profile qualifies for as JSON
    Strategies {
        #[arg(long, default_value = "w2")]
        income_type: String,
        #[arg(long)]
        annual_income: Option<f64>,
    },
    /// Print a full plan (auto-selecting strategies when none are given) as JSON
    Plan(ProfileArgs),
}

#[derive(Args, Debug, Clone)]
struct ProfileArgs {
    #[arg(
        long,
        default_value = "w2",
        help = "Income type: w2, business, self-employed, investor or mixed"
    )]
    income_type: String,
    #[arg(long, help = "Annual income; unset means no minimum-income filter")]
    annual_income: Option<f64>,
    #[arg(long, help = "Current effective tax rate in percent, defaults to 25")]
    tax_rate: Option<f64>,
    #[arg(
        long,
        default_value_t = 6.0,
        help = "Expected annual return on reinvested savings in percent"
    )]
    return_rate: f64,
    #[arg(long, default_value_t = 10, help = "Projection horizon in years")]
    time_horizon: u32,
    #[arg(
        long,
        default_value_t = true,
        action = clap::ArgAction::Set,
        help = "Compound reinvested savings (true) or track the simple total (false)"
    )]
    reinvest: bool,
    #[arg(long, value_enum, default_value_t = CliRealEstateStatus::None)]
    real_estate_status: CliRealEstateStatus,
    #[arg(
        long = "strategy",
        value_delimiter = ',',
        help = "Selected strategy id; repeat or comma-separate for several"
    )]
    strategies: Vec<String>,
}

#[derive(Debug)]
struct ApiRequest {
    profile: UserProfile,
    progress: ImplementationProgress,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StrategiesResponse {
    income_type: IncomeType,
    annual_income: Option<f64>,
    strategies: ApplicableStrategies<'static>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ForecastResponse {
    income_type: IncomeType,
    annual_income: Option<f64>,
    current_tax_rate_percent: f64,
    return_rate_percent: f64,
    time_horizon_years: u32,
    reinvest_enabled: bool,
    selected_strategy_ids: Vec<String>,
    forecast: ForecastResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressResponse {
    implementation_progress: BTreeMap<String, u32>,
    summary: ImplementationSummary,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn check_income(annual_income: Option<f64>) -> Result<(), ProfileError> {
    match annual_income {
        Some(income) if !income.is_finite() || income < 0.0 => Err(ProfileError::InvalidIncome),
        _ => Ok(()),
    }
}

fn build_profile(args: ProfileArgs) -> Result<UserProfile, ProfileError> {
    check_income(args.annual_income)?;

    if let Some(rate) = args.tax_rate {
        if !(0.0..=100.0).contains(&rate) {
            return Err(ProfileError::TaxRateOutOfRange);
        }
    }

    if !args.return_rate.is_finite() || args.return_rate <= -100.0 {
        return Err(ProfileError::InvalidReturnRate);
    }

    if args.time_horizon == 0 || args.time_horizon > MAX_HORIZON_YEARS {
        return Err(ProfileError::HorizonOutOfRange {
            max: MAX_HORIZON_YEARS,
        });
    }

    let mut profile = UserProfile {
        income_type: IncomeType::from_tag(&args.income_type),
        annual_income: args.annual_income,
        current_tax_rate_percent: args.tax_rate,
        return_rate_percent: args.return_rate,
        time_horizon_years: args.time_horizon,
        reinvest_enabled: args.reinvest,
        real_estate_status: args.real_estate_status.into(),
        selected_strategy_ids: Vec::with_capacity(args.strategies.len()),
    };
    for id in &args.strategies {
        let id = id.trim();
        if !id.is_empty() {
            profile.select(id);
        }
    }
    Ok(profile)
}

fn default_args_for_api() -> ProfileArgs {
    ProfileArgs {
        income_type: "w2".to_string(),
        annual_income: None,
        tax_rate: None,
        return_rate: 6.0,
        time_horizon: 10,
        reinvest: true,
        real_estate_status: CliRealEstateStatus::None,
        strategies: Vec::new(),
    }
}

fn api_request_from_payload(payload: ProfilePayload) -> Result<ApiRequest, ProfileError> {
    let mut args = default_args_for_api();

    if let Some(v) = payload.income_type {
        args.income_type = v;
    }
    if let Some(v) = payload.annual_income {
        args.annual_income = Some(v);
    }
    if let Some(v) = payload.current_tax_rate_percent {
        args.tax_rate = Some(v);
    }
    if let Some(v) = payload.return_rate_percent {
        args.return_rate = v;
    }
    if let Some(v) = payload.time_horizon_years {
        args.time_horizon = v;
    }
    if let Some(v) = payload.reinvest_enabled {
        args.reinvest = v;
    }
    if let Some(v) = payload.real_estate_status {
        args.real_estate_status = v.into();
    }
    if let Some(v) = payload.selected_strategy_ids {
        args.strategies = v;
    }

    let profile = build_profile(args)?;
    let progress = payload
        .implementation_progress
        .map(ImplementationProgress::from_entries)
        .unwrap_or_default();

    Ok(ApiRequest { profile, progress })
}

fn build_strategies_response(
    income_type: &str,
    annual_income: Option<f64>,
) -> Result<StrategiesResponse, ProfileError> {
    check_income(annual_income)?;
    let income_type = IncomeType::from_tag(income_type);
    Ok(StrategiesResponse {
        income_type,
        annual_income,
        strategies: select_applicable(&CATALOG, income_type, annual_income),
    })
}

fn build_forecast_response(profile: UserProfile) -> ForecastResponse {
    let forecast = compute_forecast(&profile);
    ForecastResponse {
        income_type: profile.income_type,
        annual_income: profile.annual_income,
        current_tax_rate_percent: profile
            .current_tax_rate_percent
            .unwrap_or(DEFAULT_TAX_RATE_PERCENT),
        return_rate_percent: profile.return_rate_percent,
        time_horizon_years: profile.time_horizon_years,
        reinvest_enabled: profile.reinvest_enabled,
        selected_strategy_ids: profile.selected_strategy_ids,
        forecast,
    }
}

fn build_progress_response(payload: ProgressPayload) -> ProgressResponse {
    let mut progress = ImplementationProgress::from_entries(payload.implementation_progress);
    if let Some(id) = payload.complete_step.as_deref() {
        let percent = progress.complete_step(id);
        debug!(strategy = id, percent, "implementation step completed");
    }
    let summary = summarize(&CATALOG, &payload.selected_strategy_ids, &progress);
    ProgressResponse {
        implementation_progress: progress.entries().clone(),
        summary,
    }
}

pub async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Command::Serve { port } => run_http_server(port).await?,
        Command::Forecast(args) => {
            let profile = build_profile(args)?;
            print_json(&compute_forecast(&profile))?;
        }
        Command::Strategies {
            income_type,
            annual_income,
        } => {
            print_json(&build_strategies_response(&income_type, annual_income)?)?;
        }
        Command::Plan(args) => {
            let profile = build_profile(args)?;
            print_json(&generate_plan(
                &CATALOG,
                &profile,
                &ImplementationProgress::new(),
            ))?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{text}");
    Ok(())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "escape plan HTTP API listening");
    info!("local access: http://127.0.0.1:{port}/api/strategies");

    axum::serve(listener, router()).await
}

fn router() -> Router {
    Router::new()
        .route(
            "/api/strategies",
            get(strategies_get_handler).post(strategies_post_handler),
        )
        .route("/api/forecast", post(forecast_handler))
        .route("/api/plan", post(plan_handler))
        .route("/api/progress", post(progress_handler))
        .fallback(not_found_handler)
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn strategies_get_handler(
    payload: Result<Query<StrategiesPayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => strategies_handler_impl(payload),
        Err(rejection) => malformed("query", rejection.body_text()),
    }
}

async fn strategies_post_handler(
    payload: Result<Json<StrategiesPayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => strategies_handler_impl(payload),
        Err(rejection) => malformed("JSON payload", rejection.body_text()),
    }
}

fn strategies_handler_impl(payload: StrategiesPayload) -> Response {
    let income_type = payload.income_type.as_deref().unwrap_or("w2");
    debug!(income_type, annual_income = ?payload.annual_income, "strategies request");
    match build_strategies_response(income_type, payload.annual_income) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(err) => rejected(err),
    }
}

async fn forecast_handler(payload: Result<Json<ProfilePayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => forecast_handler_impl(payload),
        Err(rejection) => malformed("JSON payload", rejection.body_text()),
    }
}

fn forecast_handler_impl(payload: ProfilePayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(err) => return rejected(err),
    };
    debug!(income_type = request.profile.income_type.tag(), "forecast request");
    json_response(StatusCode::OK, build_forecast_response(request.profile))
}

async fn plan_handler(payload: Result<Json<ProfilePayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => plan_handler_impl(payload),
        Err(rejection) => malformed("JSON payload", rejection.body_text()),
    }
}

fn plan_handler_impl(payload: ProfilePayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(err) => return rejected(err),
    };
    debug!(income_type = request.profile.income_type.tag(), "plan request");
    let plan = generate_plan(&CATALOG, &request.profile, &request.progress);
    json_response(StatusCode::OK, plan)
}

async fn progress_handler(payload: Result<Json<ProgressPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => json_response(StatusCode::OK, build_progress_response(payload)),
        Err(rejection) => malformed("JSON payload", rejection.body_text()),
    }
}

fn rejected(err: ProfileError) -> Response {
    warn!(error = %err, "rejected request");
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}

fn malformed(what: &str, detail: String) -> Response {
    warn!(%detail, "unparseable request");
    error_response(StatusCode::BAD_REQUEST, &format!("Invalid API {what}: {detail}"))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<ProfilePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload).map_err(|e| e.to_string())
}

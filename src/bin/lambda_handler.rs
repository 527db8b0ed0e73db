//! AWS Lambda handler exposing the engine entry points
//!
//! Accepts a JSON event tagged by `action`:
//!
//! ```json
//! { "action": "evaluate", "record": { "input": { "ingresoMensual": 1500 } }, "horizon_months": 12 }
//! { "action": "amortize", "principal": 71500, "annual_rate_pct": 4.99, "term_years": 20 }
//! { "action": "infer_rate", "category": "pension-fund" }
//! ```

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use mortgage_engine::amortization::infer_rate_from_label;
use mortgage_engine::{EngineConfig, MortgageEngine, ProductCategory};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum EngineRequest {
    Evaluate {
        record: Value,
        #[serde(default)]
        horizon_months: Option<u32>,
    },
    Amortize {
        principal: f64,
        #[serde(default)]
        annual_rate_pct: Option<f64>,
        #[serde(default = "default_term_years")]
        term_years: u32,
        #[serde(default)]
        horizon_months: Option<u32>,
        #[serde(default)]
        category: Option<String>,
    },
    InferRate {
        #[serde(default)]
        category: String,
    },
}

impl EngineRequest {
    fn action(&self) -> &'static str {
        match self {
            EngineRequest::Evaluate { .. } => "evaluate",
            EngineRequest::Amortize { .. } => "amortize",
            EngineRequest::InferRate { .. } => "infer_rate",
        }
    }
}

fn default_term_years() -> u32 {
    20
}

fn handle(engine: &MortgageEngine, request: EngineRequest) -> Result<Value, Error> {
    let response = match request {
        EngineRequest::Evaluate { record, horizon_months } => {
            let (normalized, evaluation) = engine.evaluate_value(record);
            let schedule = horizon_months.map(|months| engine.assess(&normalized.profile, Some(months)).schedule);
            json!({
                "profile": normalized.profile,
                "evaluation": evaluation,
                "schedule": schedule,
            })
        }
        EngineRequest::Amortize {
            principal,
            annual_rate_pct,
            term_years,
            horizon_months,
            category,
        } => {
            let category = category.as_deref().and_then(ProductCategory::parse);
            serde_json::to_value(engine.project_amortization_for(
                category,
                principal,
                annual_rate_pct,
                term_years,
                horizon_months,
            ))?
        }
        EngineRequest::InferRate { category } => serde_json::to_value(infer_rate_from_label(&category))?,
    };
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = EngineConfig::resolve(None)?;
    let engine = MortgageEngine::new(config);
    let engine = &engine;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        let request: EngineRequest = serde_json::from_value(event.payload)?;
        log::info!("handling {} request", request.action());
        handle(engine, request)
    }))
    .await
}

//! Entry point for the ROI Engine binary.
//!
//! Running this binary reads one parameter record as JSON, validates
//! it, and prints a JSON report with all three scenarios and a
//! sensitivity sweep.  The record is read from the file named by
//! `ROI_INPUT`, or from stdin when unset; see [`roi_engine::config`]
//! for the remaining variables.  Log verbosity follows `RUST_LOG`.

use anyhow::{bail, Context, Result};
use roi_engine::config::Settings;
use roi_engine::sensitivity::{DEFAULT_FIELDS, DEFAULT_VARIATIONS};
use roi_engine::{
    advisories, validate, Advisory, Engine, ParameterSet, ScenarioTriple, SensitivityCurve,
    ValidationOutcome,
};
use serde::Serialize;
use std::io::Read;
use tracing::{info, warn};

#[derive(Serialize)]
struct Report {
    parameters: ParameterSet,
    advisories: Vec<Advisory>,
    scenarios: ScenarioTriple,
    sensitivity: Vec<SensitivityCurve>,
}

fn read_input(settings: &Settings) -> Result<serde_json::Map<String, serde_json::Value>> {
    let data = match &settings.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input {path:?}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read input from stdin")?;
            buf
        }
    };
    serde_json::from_str(&data).context("input must be a JSON object")
}

fn run() -> Result<()> {
    let settings = Settings::from_env()?;
    let engine = Engine::new(settings.pricing()?);

    let params = match validate(&read_input(&settings)?) {
        ValidationOutcome::Valid(params) => params,
        invalid => bail!("invalid parameters: {}", invalid.errors().join("; ")),
    };
    let advisories = advisories(&params);
    for advisory in &advisories {
        warn!(field = %advisory.field, "{}", advisory.message);
    }

    let fields = settings.sensitivity_fields.as_deref().unwrap_or(&DEFAULT_FIELDS);
    let report = Report {
        scenarios: engine.compute_all(&params),
        sensitivity: engine.analyze(&params, fields, &DEFAULT_VARIATIONS),
        advisories,
        parameters: params,
    };
    info!(
        expected_roi = report.scenarios.expected.roi_percentage,
        "report ready"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

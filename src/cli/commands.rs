//! CLI command implementations

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::access::AccessGate;
use crate::cli::args::ConfigCommand;
use crate::config::{Settings, API_KEY_ENV, PASSWORD_ENV};
use crate::llm::{build_plan_prompt, build_provider};
use crate::plan::{self, CarePlanDocument, DocumentFormat, PatientInput, ReviewDraft};

/// Run the HTTP server
pub async fn serve(mut settings: Settings, bind: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(bind) = bind {
        settings.server.bind = bind;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    crate::server::run(settings).await
}

/// Check a password the same way the HTTP gate does
pub fn check_access(settings: &Settings, secret: &str) -> Result<()> {
    let check = AccessGate::from_settings(settings).check(secret);

    if !check.success {
        anyhow::bail!("{}", check.message);
    }

    println!("{}", check.message);
    Ok(())
}

/// Print the prompt that would be sent for a patient
pub fn print_prompt(input: &Path) -> Result<()> {
    let patient: PatientInput = read_json(input)?;
    patient.validate()?;

    println!("{}", build_plan_prompt(&patient));
    Ok(())
}

/// Generate a draft care plan
pub async fn generate_plan(settings: &Settings, input: &Path, output: Option<PathBuf>) -> Result<()> {
    let patient: PatientInput = read_json(input)?;
    patient.validate()?;

    let provider = build_provider(settings)?;

    tracing::info!("Generating care plan with {}", provider.name());
    let generated = plan::generate_plan(provider.as_ref(), &patient).await?;
    let json = serde_json::to_string_pretty(&generated)?;

    if let Some(path) = output {
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write plan: {}", path.display()))?;
        println!("Plan written to: {}", path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

/// Render an approved plan into a document
pub fn render_plan(
    settings: &Settings,
    patient: &Path,
    plan: &Path,
    format: DocumentFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let patient: PatientInput = read_json(patient)?;
    let draft: ReviewDraft = read_json(plan)?;
    let approved = draft.approve();

    let document = CarePlanDocument::new(&patient, &approved, &settings.clinic);
    let content = document.render(format)?;

    if let Some(path) = output {
        std::fs::write(&path, content)?;
        println!("Exported to: {}", path.display());
    } else {
        print!("{}", content);
    }

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut redacted = settings.clone();
            if redacted.access.password.is_some() {
                redacted.access.password = Some("********".to_string());
            }
            if !redacted.llm.api_key.is_empty() {
                redacted.llm.api_key = "********".to_string();
            }
            let toml = toml::to_string_pretty(&redacted)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: &'static str,
    detail: String,
}

#[derive(Serialize)]
struct DoctorReport {
    provider: String,
    model: String,
    listen: String,
    checks: Vec<DoctorCheck>,
    notes: Vec<String>,
}

/// Run diagnostic checks to help troubleshoot configuration issues.
pub async fn run_doctor(settings: &Settings, json: bool) -> Result<()> {
    let report = collect_doctor_report(settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("careplan doctor");
    println!("provider: {} ({})", report.provider, report.model);
    println!("listen: {}", report.listen);
    println!();

    for check in &report.checks {
        println!("{:<10} {:<8} {}", check.name, check.status, check.detail);
    }

    if !report.notes.is_empty() {
        println!();
        for note in &report.notes {
            println!("{}", note);
        }
    }

    Ok(())
}

fn collect_doctor_report(settings: &Settings) -> DoctorReport {
    let mut notes = Vec::new();

    let password_ok = settings.access.password.is_some();
    if !password_ok {
        notes.push(format!(
            "hint: set access.password in config or {} to enable the web app.",
            PASSWORD_ENV
        ));
    }

    let provider_check = match build_provider(settings) {
        Ok(provider) => DoctorCheck {
            name: "provider",
            status: "ok",
            detail: format!("{} client ready", provider.name()),
        },
        Err(e) => {
            notes.push(format!(
                "hint: set llm.api_key in config or {} for plan generation.",
                API_KEY_ENV
            ));
            DoctorCheck {
                name: "provider",
                status: "error",
                detail: e.to_string(),
            }
        }
    };

    DoctorReport {
        provider: settings.llm.provider.clone(),
        model: match settings.llm.model.trim() {
            "" => "provider default".to_string(),
            model => model.to_string(),
        },
        listen: settings.listen_addr(),
        checks: vec![
            DoctorCheck {
                name: "password",
                status: if password_ok { "ok" } else { "missing" },
                detail: "required for every gated request".to_string(),
            },
            provider_check,
        ],
        notes,
    }
}

// Helper functions

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

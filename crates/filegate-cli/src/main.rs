mod cli;

use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use filegate_core::{
    classify, mime_for_file_name, print_octets, sniff_bytes, ClassifierConfig, DownloadRequest,
    DownloadResponse, RawPayload,
};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands, ProfileArg};

/// Exit status when the payload itself is rejected.
const EXIT_REJECTED: u8 = 2;

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_json);
    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Classify {
            input,
            raw,
            file_name,
            file_name_override,
            profile,
            config,
            out,
        } => {
            let config = load_config(config.as_deref(), profile)?;
            let mut request = DownloadRequest::new();
            request.file_name = file_name;
            request.file_name_override = file_name_override;
            run_classify(input.as_deref(), raw, &request, &config, out.as_deref())
        }
        Commands::Sniff { path } => run_sniff(&path),
    }
}

fn load_config(path: Option<&Path>, profile: ProfileArg) -> Result<ClassifierConfig> {
    match path {
        Some(path) => ClassifierConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ClassifierConfig::for_profile(profile.into())),
    }
}

fn read_input(input: Option<&Path>) -> Result<Vec<u8>> {
    match input {
        Some(path) if path != Path::new("-") => {
            fs::read(path).with_context(|| format!("reading {}", path.display()))
        }
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn run_classify(
    input: Option<&Path>,
    raw: bool,
    request: &DownloadRequest,
    config: &ClassifierConfig,
    out: Option<&Path>,
) -> Result<ExitCode> {
    let input_bytes = read_input(input)?;
    let parsed = if raw {
        RawPayload::from(input_bytes)
    } else {
        let value: Value = serde_json::from_slice(&input_bytes)
            .context("input is not JSON; pass --raw for binary input")?;
        match RawPayload::inspect(&value) {
            Ok(payload) => payload,
            Err(err) => return Ok(report_rejection(err.into())),
        }
    };
    info!(kind = parsed.kind(), "payload inspected");

    let classification = match classify(parsed, request, config) {
        Ok(classification) => classification,
        Err(err) => return Ok(report_rejection(err)),
    };
    let detected = classification.content_type.detected;
    let response = DownloadResponse::from(classification);

    if let Some(path) = out {
        fs::write(path, response.body.as_bytes())
            .with_context(|| format!("writing {}", path.display()))?;
    }

    let headers: serde_json::Map<String, Value> = response
        .headers()
        .into_iter()
        .map(|(name, value)| (name.to_string(), Value::String(value)))
        .collect();
    let summary = json!({
        "status": response.status,
        "content_type": response.content_type,
        "detected": detected,
        "file_name": response.file_name,
        "size": response.body.len(),
        "head": print_octets(&response.body, 16),
        "headers": headers,
        "written_to": out.map(|p| p.display().to_string()),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(ExitCode::SUCCESS)
}

fn report_rejection(err: filegate_core::ClassifyError) -> ExitCode {
    let report = json!({
        "status": err.status_code(),
        "body": err.to_error_body(),
        "reason": err.to_string(),
    });
    println!("{report:#}");
    ExitCode::from(EXIT_REJECTED)
}

fn run_sniff(path: &Path) -> Result<ExitCode> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let report = json!({
        "path": path.display().to_string(),
        "size": bytes.len(),
        "sniffed": sniff_bytes(&bytes).unwrap_or("unknown"),
        "by_extension": mime_for_file_name(&name),
        "head": print_octets(&bytes, 16),
    });
    println!("{report:#}");
    Ok(ExitCode::SUCCESS)
}

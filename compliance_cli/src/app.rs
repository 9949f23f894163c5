use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use compliance_client::{print_message, ComplianceRunner};
use compliance_config::ComplianceConfig;
use compliance_logging::{init_logging, LoggingConfig};
use tracing::info;

use crate::constants::{CURRENT_VERSION, PROGRAM_NAME};

#[derive(Subcommand, Debug)]
#[non_exhaustive]
enum Command {
    /// Submit a run configuration, wait for the conformance run to finish and download the
    /// result archive.
    Run(RunArg),

    /// Print the configuration a run would use once environment variables and flags are applied.
    ShowConfig(RunArg),
}

#[derive(Args, Debug)]
struct RunArg {
    /// The JSON run configuration to submit. Default "config.json".
    #[clap(long, short)]
    config: Option<PathBuf>,

    /// Base URL of the conformance service, e.g. https://localhost:3001/v1.
    #[clap(long)]
    base_url: Option<String>,

    /// Websocket URL of the notification service, e.g. ws://localhost:8080.
    #[clap(long)]
    notification_url: Option<String>,

    /// Directory the result archive is written to. Default is the current directory.
    #[clap(long, short)]
    output_dir: Option<PathBuf>,

    /// Accept invalid TLS certificates from the conformance service. Only meant for local
    /// test deployments using self-signed certificates.
    #[clap(long)]
    insecure: bool,

    /// A notification message that marks the run as complete. Without it the wait ends only
    /// when the notification service closes the channel.
    #[clap(long)]
    completion_marker: Option<String>,

    /// Buffer size in bytes used while writing the archive. Default 1024.
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    chunk_size: Option<u64>,
}

impl RunArg {
    fn apply_to(&self, config: &mut ComplianceConfig) {
        if let Some(path) = &self.config {
            config.run.config_path = path.clone();
        }
        if let Some(url) = &self.base_url {
            config.endpoints.base_url = url.clone();
        }
        if let Some(url) = &self.notification_url {
            config.endpoints.notification_url = url.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.download.output_dir = dir.clone();
        }
        if self.insecure {
            config.http.accept_invalid_certs = true;
        }
        if let Some(marker) = &self.completion_marker {
            config.run.completion_marker = Some(marker.clone());
        }
        if let Some(chunk_size) = self.chunk_size {
            config.download.chunk_size = chunk_size as usize;
        }
    }
}

#[derive(Args, Debug)]
struct CliOverrides {
    /// Where to write logs: a file, or a directory (trailing '/') to create a timestamped file
    /// in. Writes to stderr if not provided.
    #[clap(long, global = true)]
    log: Option<String>,

    /// Log format, "json" or "pretty".
    #[clap(long, global = true)]
    log_format: Option<String>,
}

/// Runs MQTT broker conformance tests on a remote conformance service.
///
/// A run has three steps: the run configuration is posted to the service, which returns a run
/// identifier; the notification channel is watched until the service reports the run complete;
/// and the result archive is downloaded to "result_<identifier>.zip".
///
/// Every option can also be set through environment variables named
/// MQTT_COMPLIANCE_<GROUP>_<FIELD>, e.g. MQTT_COMPLIANCE_ENDPOINTS_BASE_URL. Flags take precedence.
#[derive(Parser, Debug)]
#[clap(name = PROGRAM_NAME, version = CURRENT_VERSION, propagate_version = true, verbatim_doc_comment)]
pub struct ComplianceApp {
    #[clap(flatten)]
    overrides: CliOverrides,

    #[clap(subcommand)]
    command: Command,
}

impl ComplianceApp {
    /// Defaults, then environment variables, then command line flags.
    pub fn effective_config(&self) -> ComplianceConfig {
        let mut config = ComplianceConfig::new();

        if let Some(dest) = &self.overrides.log {
            config.log.dest = Some(dest.clone());
        }
        if let Some(format) = &self.overrides.log_format {
            config.log.format = Some(format.clone());
        }

        match &self.command {
            Command::Run(args) | Command::ShowConfig(args) => args.apply_to(&mut config),
        }

        config
    }

    pub async fn run(self) -> Result<()> {
        let config = self.effective_config();

        match self.command {
            Command::Run(_) => run_command(config).await,
            Command::ShowConfig(_) => {
                println!("{config:#?}");
                Ok(())
            },
        }
    }
}

async fn run_command(config: ComplianceConfig) -> Result<()> {
    init_logging(LoggingConfig::new(format!("{PROGRAM_NAME} {CURRENT_VERSION}"), &config.log));

    let runner = ComplianceRunner::new(&config).context("invalid service configuration")?;
    let config_path = &config.run.config_path;

    let submission = runner
        .submit(config_path)
        .await
        .with_context(|| format!("submitting run configuration {config_path:?}"))?;
    println!("{}", submission.response);
    let run_id = submission.run_id;
    println!("Run identifier: {run_id}");

    let wait = runner
        .wait_for_completion(print_message)
        .await
        .context("waiting for the run to complete")?;
    info!(run_id = %run_id, messages = wait.messages_received, reason = ?wait.reason, "Run complete");

    println!("Downloading");
    let download = runner
        .download(&run_id)
        .await
        .with_context(|| format!("downloading results of run {run_id}"))?;
    println!("Saved {} bytes to {} (HTTP {})", download.bytes_written, download.path.display(), download.status);

    Ok(())
}

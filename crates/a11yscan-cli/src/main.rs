//! a11yscan CLI
//!
//! Single-purpose binary meant to run inside a CI job: it reads the webhook
//! event that triggered the workflow, scans the changed template files for
//! accessibility violations, and posts the report back to the pull request
//! or commit. All inputs arrive as flags or through the environment the CI
//! runner already provides.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Instrument, Level};
use uuid::Uuid;

use a11yscan_ci::{ScanContext, ScanOutcome, ScanPipeline};
use a11yscan_domain::{RepoCoordinates, TriggerEvent};
use a11yscan_engine::{BuiltinEngine, RuleConfig, RuleEngine};
use a11yscan_host::{GitHubHost, RepoHost};

mod telemetry;

#[derive(Parser)]
#[command(name = "a11yscan")]
#[command(author = "Stevedores Org")]
#[command(version = a11yscan_domain::VERSION)]
#[command(about = "Accessibility checks for changed templates, posted as PR or commit comments", long_about = None)]
struct Cli {
    /// API token used for compare, content, and comment calls
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Name of the event that triggered the run (pull_request or push)
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: String,

    /// Path to the JSON payload of the trigger event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,

    /// Repository the run acts on, as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// Base URL of the source-host API
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    api_url: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    telemetry::init_tracing(cli.json, level);

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("a11yscan.run", run_id = %run_id);
    execute(cli).instrument(span).await
}

async fn execute(cli: Cli) -> Result<()> {
    let repo: RepoCoordinates = cli
        .repository
        .parse()
        .context("Invalid repository coordinates")?;
    let payload = load_event_payload(&cli.event_path)?;
    let trigger = TriggerEvent::from_webhook(&cli.event_name, &payload)
        .context("Could not resolve a trigger from the event payload")?;

    let rules = RuleConfig::standard();
    let disabled: Vec<&str> = rules
        .overrides()
        .iter()
        .filter(|o| !o.enabled)
        .map(|o| o.id.as_str())
        .collect();
    info!(?disabled, "using standard rule configuration");

    let ctx = ScanContext::new(repo, trigger, rules);
    let host: Arc<dyn RepoHost> = Arc::new(GitHubHost::with_base_url(&cli.api_url, &cli.token));
    let engine: Arc<dyn RuleEngine> = Arc::new(BuiltinEngine::new());

    match ScanPipeline::run(host, engine, &ctx).await? {
        ScanOutcome::Published {
            target,
            files_scanned,
            violations,
        } => {
            info!(%target, files_scanned, violations, "run complete");
        }
        ScanOutcome::NothingToValidate => {
            info!("run complete, no template changes in range");
        }
    }

    Ok(())
}

fn load_event_payload(path: &Path) -> Result<serde_json::Value> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Could not read the event payload at {}", path.display()))?;
    serde_json::from_str(&raw).context("The event payload is not valid JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_event_payload_resolves_push_trigger() {
        let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
        write!(file, r#"{{"before": "aaa", "after": "bbb"}}"#).expect("should write payload");

        let payload = load_event_payload(file.path()).expect("should load payload");
        let trigger =
            TriggerEvent::from_webhook("push", &payload).expect("should resolve trigger");

        assert_eq!(trigger.kind(), "push");
        assert_eq!(trigger.revision_range().to_string(), "aaa...bbb");
    }

    #[test]
    fn test_load_event_payload_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
        write!(file, "not json").expect("should write payload");

        assert!(load_event_payload(file.path()).is_err());
    }

    #[test]
    fn test_load_event_payload_reports_missing_file() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let missing = dir.path().join("event.json");

        let err = load_event_payload(&missing).expect_err("should fail on missing file");
        assert!(err.to_string().contains("event.json"));
    }

    #[test]
    fn test_cli_parses_explicit_args() {
        let cli = Cli::try_parse_from([
            "a11yscan",
            "--token",
            "t0ken",
            "--event-name",
            "pull_request",
            "--event-path",
            "/tmp/event.json",
            "--repository",
            "octocat/hello-world",
            "--api-url",
            "https://github.example.com/api/v3",
        ])
        .expect("should parse");

        assert_eq!(cli.event_name, "pull_request");
        assert_eq!(cli.repository, "octocat/hello-world");
        assert_eq!(cli.api_url, "https://github.example.com/api/v3");
        assert!(!cli.verbose);
        assert!(!cli.json);
    }
}

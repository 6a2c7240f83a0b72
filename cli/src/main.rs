//! CLI for ghsync.
//!
//! Clones every GitHub repository visible to you (and your organizations)
//! into `<dir>/<owner>/<repo>`, pulling the ones that are already there.

use clap::Parser;
use dialoguer::Password;
use ghsync::{
    read_git_config_user, resolve_base_dir, ConfigError, GitCli, GitHubInventory, RunSummary,
    Runner, RunnerError, SyncConfig, SyncSettings,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// ghsync - Clone or update all of your GitHub repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Add an `upstream` remote pointing at the parent of every fork.
    #[arg(long)]
    upstream: bool,

    /// Only sync repositories of this organization.
    #[arg(short = 'o', long = "org")]
    organization: Option<String>,

    /// GitHub password or personal access token; prompted for when absent.
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    password: Option<String>,

    /// GitHub username; defaults to `git config github.user`.
    #[arg(short, long)]
    user: Option<String>,

    /// Directory to sync into; defaults to $GHSYNC_DIR, then the current directory.
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Path to a TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip existing directories that are not git working copies instead of pulling them.
    #[arg(long)]
    verify_working_copies: bool,

    /// Print what would be cloned and updated without doing it.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.all_success() {
                ExitCode::from(0)
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with `RUST_LOG` filtering, defaulting to "info".
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let settings = match &args.config {
        Some(path) => SyncSettings::load(path)?,
        None => SyncSettings::default(),
    };

    let config = SyncConfig::new(resolve_base_dir(args.dir, settings.base_dir)?)
        .with_organization(args.organization.or(settings.organization))
        .with_link_upstream(args.upstream || settings.upstream)
        .with_verify_working_copies(args.verify_working_copies || settings.verify_working_copies)
        .with_dry_run(args.dry_run);

    let user = match args.user {
        Some(user) => Some(user),
        None => match read_git_config_user().await {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "No GitHub username, authenticating with a token");
                None
            }
        },
    };

    let secret = match args.password {
        Some(secret) => secret,
        None => prompt_password()?,
    };

    let inventory = GitHubInventory::new(user, secret)?;
    let runner = Runner::new(config, inventory, GitCli::new());
    runner.run().await
}

/// Asks for the password without echoing it.
fn prompt_password() -> Result<String, ConfigError> {
    Password::new()
        .with_prompt("Type in your GitHub password or token")
        .interact()
        .map_err(|e| ConfigError::PasswordPrompt(std::io::Error::other(e.to_string())))
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Repositories: {}", summary.repositories_processed);

    if summary.dry_run {
        println!("  Operations planned: {}", summary.planned);
    } else {
        println!(
            "  Cloned: {} ({} failed)",
            summary.clones_succeeded, summary.clones_failed
        );
        println!(
            "  Updated: {} ({} failed)",
            summary.pulls_succeeded, summary.pulls_failed
        );
        println!(
            "  Upstreams linked: {} ({} failed)",
            summary.upstreams_linked, summary.upstreams_failed
        );
    }
    println!("  Skipped: {}", summary.skipped);

    if !summary.problems.is_empty() {
        println!("\nProblems:");
        for problem in &summary.problems {
            let detail = match &problem.status {
                ghsync::OperationStatus::Failed { error } => error.as_str(),
                ghsync::OperationStatus::Skipped { reason } => reason.as_str(),
                _ => "",
            };
            println!(
                "  {} {} [{}]: {}",
                problem.repository,
                problem.kind.as_str(),
                problem.status.as_str(),
                detail
            );
        }
    }
}

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_flow::build::CargoBuild;
use git_flow::config;
use git_flow::flow::{BranchStarter, FlowKind, StartOptions};
use git_flow::git::Git2Backend;
use git_flow::prompt::ConsolePrompter;
use git_flow::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-flow",
    about = "Start git-flow branches with coordinated version updates"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Run a clean build after the version commit")]
    install: bool,

    #[arg(short = 'B', long, help = "Never prompt; accept computed defaults")]
    batch: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Start a feature branch off the development branch
    Feature,
    /// Start the release branch off the development branch
    Release,
    /// Start a hotfix branch off production or a support line
    Hotfix,
    /// Start a support branch for the current major.minor line
    Support,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize backend ports
    let git = match Git2Backend::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };
    let build = CargoBuild::new("Cargo.toml");
    let prompter = ConsolePrompter;

    let kind = match args.command {
        Command::Feature => FlowKind::Feature,
        Command::Release => FlowKind::Release,
        Command::Hotfix => FlowKind::Hotfix,
        Command::Support => FlowKind::Support,
    };

    let options = StartOptions {
        install: args.install || config.behavior.install_project,
        interactive: !args.batch,
    };

    let starter = BranchStarter::new(&git, &build, &prompter, &config, options);

    ui::display_status(&format!("Starting {} branch", kind.label()));
    match starter.start(kind) {
        Ok(outcome) => {
            ui::display_success(&format!(
                "Created and checked out branch: {}",
                outcome.branch
            ));

            if let Some(version) = &outcome.version {
                ui::display_success(&format!("Project version set to {}", version));
            }

            if let Some(install_error) = &outcome.install_error {
                ui::display_warning(&format!(
                    "Build failed on the new branch: {}",
                    install_error
                ));
            }

            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

mod actions;
mod cli_messages;
mod config;
mod consts;
mod controller;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod patch;
mod runtime_api;
mod session;
mod staging;
mod status;
mod ui;
mod view;

use crate::actions::{Action, ActionFailure, ControlAction};
use crate::cli_messages::print_failure;
use crate::config::{Config, get_config_path, get_log_path};
use crate::controller::{Controller, Snapshot};
use crate::environment::Environment;
use crate::logging::{LogSink, init_logging};
use crate::patch::NewPatch;
use crate::session::{SessionData, run_headless_mode, run_tui_mode, setup_session};
use crate::view::{DashboardView, render_text};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Dashboard for the patch runtime API
struct Args {
    /// Base URL of the runtime API, or "local"
    #[arg(long, global = true, env = "PATCHDASH_BASE_URL", value_name = "URL")]
    base_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the live dashboard
    Watch {
        /// Print each refresh as text instead of drawing the dashboard
        #[arg(long, default_value_t = false)]
        headless: bool,

        /// Seconds between automatic refreshes; 0 turns polling off
        #[arg(long, value_name = "SECONDS")]
        refresh_secs: Option<u64>,

        /// Paint a dark background behind the dashboard
        #[arg(long = "with-background", default_value_t = false)]
        with_background: bool,
    },
    /// Print the current status and patch lists once
    Status,
    /// Check that the runtime API is up
    Health,
    /// Pause or resume the runtime loop
    Control {
        #[arg(value_enum)]
        action: ControlAction,
    },
    /// Apply a pending patch
    Apply {
        #[arg(value_name = "PATCH_ID")]
        patch_id: String,
    },
    /// Roll a patch back
    Rollback {
        #[arg(value_name = "PATCH_ID")]
        patch_id: String,
    },
    /// Submit a new patch
    Create {
        #[command(flatten)]
        patch: PatchArgs,
    },
    /// Pause the loop, then create and apply a patch in one go
    Stage {
        #[command(flatten)]
        patch: PatchArgs,

        /// Resume the loop once the patch is applied
        #[arg(long, default_value_t = false)]
        resume: bool,
    },
    /// Remember the runtime URL for later commands
    Connect {
        #[arg(value_name = "URL")]
        url: String,

        /// Seconds between automatic refreshes; 0 turns polling off
        #[arg(long, value_name = "SECONDS")]
        refresh_secs: Option<u64>,
    },
    /// Forget the saved runtime URL
    Disconnect,
}

#[derive(clap::Args)]
struct PatchArgs {
    /// Patch identifier, chosen by the caller
    #[arg(long)]
    patch_id: Option<String>,

    /// One-line description of the change
    #[arg(long)]
    summary: String,

    #[arg(long)]
    author: String,

    #[arg(long)]
    notes: Option<String>,

    /// Where the built artifact lives
    #[arg(long)]
    artifact_uri: Option<String>,

    /// File whose contents are sent as the diff preview
    #[arg(long, value_name = "PATH")]
    diff_file: Option<PathBuf>,

    /// Extra field sent as-is, as key=value (repeatable)
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    fields: Vec<(String, String)>,
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

impl PatchArgs {
    /// Named options win over `--field` entries with the same key.
    fn into_fields(self) -> Result<Vec<(String, String)>, std::io::Error> {
        let mut fields = self.fields;
        let named = [
            ("patch_id", self.patch_id),
            ("summary", Some(self.summary)),
            ("author", Some(self.author)),
            ("notes", self.notes),
            ("artifact_uri", self.artifact_uri),
        ];
        for (key, value) in named {
            if let Some(value) = value {
                fields.push((key.to_string(), value));
            }
        }
        if let Some(path) = self.diff_file {
            fields.push(("diff_preview".to_string(), std::fs::read_to_string(path)?));
        }
        Ok(fields)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let sink_path = match &args.command {
        Command::Watch {
            headless: false, ..
        } => Some(get_log_path()?),
        _ => None,
    };
    let sink = sink_path.as_deref().map_or(LogSink::Stderr, LogSink::File);
    if let Err(e) = init_logging(sink) {
        print_cmd_warn!("Logging disabled", "{}", e);
    }

    let config_path = get_config_path()?;
    let base_url = args.base_url.as_deref();

    match args.command {
        Command::Watch {
            headless,
            refresh_secs,
            with_background,
        } => {
            let config = Config::load_or_default(&config_path)?;
            let session = setup_session(&config, base_url, refresh_secs)?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::Status => {
            let session = one_shot_session(&config_path, base_url)?;
            let snapshot = session.controller.refresh().await;
            finish(snapshot)
        }
        Command::Health => {
            let session = one_shot_session(&config_path, base_url)?;
            match session.controller.api().health().await {
                Ok(health) if health.is_ok() => {
                    print_cmd_success!("Runtime healthy", "{}", session.environment.base_url());
                    Ok(())
                }
                Ok(health) => {
                    print_cmd_warn!("Runtime unhealthy", "status: {}", health.status);
                    std::process::exit(1);
                }
                Err(e) => {
                    print_cmd_error!("health check failed", e.to_string().as_str());
                    std::process::exit(1);
                }
            }
        }
        Command::Control { action } => {
            let session = one_shot_session(&config_path, base_url)?;
            finish(run_action(&session.controller, Action::Control(action)).await)
        }
        Command::Apply { patch_id } => {
            let session = one_shot_session(&config_path, base_url)?;
            finish(run_action(&session.controller, Action::Apply(patch_id)).await)
        }
        Command::Rollback { patch_id } => {
            let session = one_shot_session(&config_path, base_url)?;
            finish(run_action(&session.controller, Action::Rollback(patch_id)).await)
        }
        Command::Create { patch } => {
            let session = one_shot_session(&config_path, base_url)?;
            let patch = NewPatch::from_fields(patch.into_fields()?, Utc::now());
            finish(run_action(&session.controller, Action::CreatePatch(patch)).await)
        }
        Command::Stage { patch, resume } => {
            let session = one_shot_session(&config_path, base_url)?;
            let patch = staging::staged_patch(patch.into_fields()?, Utc::now());
            match staging::stage(&session.controller, patch, resume).await {
                Ok(report) => {
                    if !report.paused {
                        print_cmd_warn!("Loop not paused", "the patch went in while it was running");
                    }
                    if resume && !report.resumed {
                        print_cmd_warn!("Loop not resumed", "run `patchdash control resume` to continue it");
                    }
                    print_cmd_success!("Patch staged", "{}", report.patch_id);
                    finish(Ok(report.snapshot))
                }
                Err(failure) => finish(Err(failure)),
            }
        }
        Command::Connect { url, refresh_secs } => {
            let environment: Environment = url.parse()?;
            let existing = Config::load_or_default(&config_path)?;
            let config = Config::new(
                Some(environment.base_url()),
                refresh_secs.unwrap_or(existing.refresh_interval_secs),
            );
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!("Connected", "{}", environment.base_url());
            Ok(())
        }
        Command::Disconnect => {
            Config::clear(&config_path)?;
            print_cmd_info!("Disconnected", "removed {}", config_path.display());
            Ok(())
        }
    }
}

fn one_shot_session(
    config_path: &std::path::Path,
    base_url: Option<&str>,
) -> Result<SessionData, Box<dyn Error>> {
    let config = Config::load_or_default(config_path)?;
    setup_session(&config, base_url, None)
}

/// Submits the action and, once accepted, refreshes.
async fn run_action(controller: &Controller, action: Action) -> Result<Snapshot, ActionFailure> {
    controller.submit(&action).await?;
    print_cmd_success!("Accepted", "{}", action);
    controller.refresh().await
}

/// Prints the refreshed dashboard, or the failure and exits with status 1.
fn finish(result: Result<Snapshot, ActionFailure>) -> Result<(), Box<dyn Error>> {
    match result {
        Ok(snapshot) => {
            println!("{}", render_text(&DashboardView::from_snapshot(&snapshot)));
            Ok(())
        }
        Err(failure) => {
            log::debug!("{:?}", failure);
            print_failure(&failure);
            std::process::exit(1);
        }
    }
}

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use page_core::{
    navigation::fragment_from_location, Dispatched, HttpSubmissionService, PageController,
    PageDeps, PageEvent, SimulatedSubmissionService, SubmissionService, SubmitOutcome,
    TokioScheduler,
};
use shared::domain::SectionRegistry;
use storage::{DisabledStore, JsonFileStore, KeyValueStore, PreferenceStore};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::JoinHandle,
};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod console_view;

use commands::{parse_command, ShellCommand, HELP};
use config::{load_config, SiteConfig};
use console_view::ConsoleView;

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Parser, Debug)]
#[command(about = "Drive the single-page site controllers from a terminal")]
struct Args {
    /// Config file; defaults to ./site.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Page location to start from, e.g. `https://example.com/#faq` or `#faq`.
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    state_dir: Option<PathBuf>,
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    site_name: Option<String>,
    /// Keep the last-viewed section in memory only.
    #[arg(long)]
    no_persist: bool,
}

impl Args {
    fn apply(&self, config: &mut SiteConfig) {
        if let Some(dir) = &self.state_dir {
            config.state_dir = Some(dir.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.submission_endpoint = Some(endpoint.clone());
        }
        if let Some(name) = &self.site_name {
            config.site_name = name.clone();
        }
        if self.no_persist {
            config.persist_preferences = false;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    args.apply(&mut config);

    let fragment = args.location.as_deref().and_then(fragment_from_location);
    let view = Arc::new(ConsoleView::stdout(
        fragment.as_ref().map(|f| format!("#{f}")),
    ));
    let mut page = PageController::start(
        PageDeps {
            view: view.clone(),
            scheduler: Arc::new(TokioScheduler::current()),
            preferences: PreferenceStore::new(preference_backend(&config)),
            registry: SectionRegistry::new(&config.site_name),
            service: submission_service(&config)?,
        },
        &config.page_settings(),
        fragment.as_deref(),
    );

    let mut pending: Vec<JoinHandle<()>> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        let event = match command {
            ShellCommand::Page(event) => event,
            ShellCommand::Back => match view.back() {
                Some(fragment) => PageEvent::HistoryChanged { fragment },
                None => {
                    println!("already at the oldest history entry");
                    continue;
                }
            },
            ShellCommand::Forward => match view.forward() {
                Some(fragment) => PageEvent::HistoryChanged { fragment },
                None => {
                    println!("already at the newest history entry");
                    continue;
                }
            },
            ShellCommand::SetField(field, value) => {
                view.set_field(field, &value);
                continue;
            }
            ShellCommand::Submit => PageEvent::Submit {
                form: view.form_snapshot(),
            },
            ShellCommand::Show => {
                view.render_summary();
                continue;
            }
            ShellCommand::Help => {
                println!("{HELP}");
                continue;
            }
            ShellCommand::Quit => break,
        };

        match page.dispatch(event) {
            Dispatched::NavigationRejected => println!("no such section"),
            Dispatched::SubmissionStarted(handle) => {
                pending.retain(|task| !task.is_finished());
                pending.push(tokio::spawn(report_submission(handle)));
            }
            _ => {}
        }
    }

    for task in pending {
        if let Err(err) = task.await {
            tracing::error!(error = %err, "submission reporter failed");
        }
    }
    Ok(())
}

fn preference_backend(config: &SiteConfig) -> Arc<dyn KeyValueStore> {
    if !config.persist_preferences {
        return Arc::new(DisabledStore);
    }
    match config.resolve_state_dir() {
        Some(dir) => Arc::new(JsonFileStore::new(dir.join(PREFERENCES_FILE))),
        None => {
            tracing::warn!("no state directory available; preferences will not persist");
            Arc::new(DisabledStore)
        }
    }
}

fn submission_service(config: &SiteConfig) -> Result<Arc<dyn SubmissionService>> {
    let service: Arc<dyn SubmissionService> = match &config.submission_endpoint {
        Some(endpoint) => {
            tracing::info!(endpoint = %endpoint, "submitting to remote endpoint");
            Arc::new(HttpSubmissionService::new(endpoint)?)
        }
        None => Arc::new(SimulatedSubmissionService::new(config.simulated_latency())),
    };
    Ok(service)
}

async fn report_submission(handle: JoinHandle<SubmitOutcome>) {
    match handle.await {
        Ok(SubmitOutcome::Succeeded(receipt)) => {
            tracing::info!(reference = %receipt.reference, "submission accepted")
        }
        Ok(SubmitOutcome::Rejected) => println!("a submission is already in progress"),
        Ok(outcome) => tracing::debug!(?outcome, "submission finished"),
        Err(err) => tracing::error!(error = %err, "submission task failed"),
    }
}

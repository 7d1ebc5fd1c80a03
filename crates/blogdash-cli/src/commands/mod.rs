//! Subcommand implementations.

mod analytics;
mod authors;
mod config;
mod delete;
mod edit;
mod posts;

use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::Subcommand;
use tracing::debug;

use blogdash_core::{PostId, PostService};
use blogdash_view::{AnalyticsView, ViewConfig};

use crate::cli::GlobalOptions;
use crate::output;
use crate::service::CliService;
use crate::settings::{self, Resolved, storage};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the author charts and one page of the posts table
    Analytics(analytics::AnalyticsArgs),

    /// Show posts per author
    Authors(authors::AuthorsArgs),

    /// Show one page of the posts table
    Posts(posts::PostsArgs),

    /// Delete a post and show the refreshed view
    Delete(delete::DeleteArgs),

    /// Raise an edit request for a post
    Edit(edit::EditArgs),

    /// Manage persisted settings
    Config(config::ConfigCommand),
}

pub async fn handle(cmd: Command, global: GlobalOptions) -> Result<()> {
    match cmd {
        Command::Analytics(args) => analytics::run(args, &global).await,
        Command::Authors(args) => authors::run(args, &global).await,
        Command::Posts(args) => posts::run(args, &global).await,
        Command::Delete(args) => delete::run(args, &global).await,
        Command::Edit(args) => edit::run(args, &global).await,
        Command::Config(args) => config::run(args, &global),
    }
}

/// Resolve connection settings from flags, environment and the settings file.
pub(crate) fn resolve(global: &GlobalOptions) -> Result<Resolved> {
    let stored = storage::load_settings()?;
    settings::resolve(
        global.service.as_deref(),
        global.timeout_secs,
        std::env::var(settings::SERVICE_ENV).ok(),
        std::env::var(settings::TIMEOUT_ENV).ok(),
        &stored,
    )
}

fn connect(global: &GlobalOptions) -> Result<(CliService, ViewConfig)> {
    let resolved = resolve(global)?;
    let service = CliService::connect(resolved.service.clone(), resolved.timeout)
        .context("Failed to open post service")?;
    debug!(
        service = %resolved.service,
        source = %resolved.service_source,
        backend = service.kind(),
        timeout_ms = resolved.timeout.as_millis() as u64,
        "Resolved service"
    );

    let config = ViewConfig::default().with_request_timeout(resolved.timeout);
    Ok((service, config))
}

/// Connect and run the initial load, failing if it does not succeed.
pub(crate) async fn open_view(global: &GlobalOptions) -> Result<AnalyticsView<CliService>> {
    let (service, config) = connect(global)?;
    let view = AnalyticsView::new(service, config);

    view.reload()
        .await
        .with_context(|| format!("Failed to load posts from {}", view.service().url()))?;

    Ok(view)
}

/// Connect and activate a view. A failed first load leaves it empty; report
/// that with [`load_status`] once the view has been rendered.
pub(crate) async fn activate_view(global: &GlobalOptions) -> Result<AnalyticsView<CliService>> {
    let (service, config) = connect(global)?;
    Ok(AnalyticsView::activate(service, config).await)
}

/// Error for a view whose last load failed.
pub(crate) fn load_status(view: &AnalyticsView<CliService>) -> Result<()> {
    match view.last_error() {
        Some(message) => Err(anyhow!(message)
            .context(format!("Failed to load posts from {}", view.service().url()))),
        None => Ok(()),
    }
}

/// Move the view to `page`, warning when it is out of range.
pub(crate) fn select_page(view: &AnalyticsView<CliService>, page: Option<usize>) {
    let Some(page) = page else {
        return;
    };
    if !view.go_to_page(page) {
        let state = view.page_state();
        output::warning(&format!(
            "Page {} is out of range (1-{}), showing page {}",
            page,
            state.total_pages.max(1),
            state.current_page
        ));
    }
}

/// Parse a post id, treating integers as numeric ids.
pub(crate) fn parse_id(raw: &str) -> Result<PostId> {
    if let Ok(n) = raw.parse::<i64>() {
        return Ok(PostId::from_number(n));
    }
    PostId::from_str(raw).context("Invalid post id")
}

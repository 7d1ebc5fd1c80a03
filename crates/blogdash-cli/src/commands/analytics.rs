//! Analytics command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use blogdash_core::PostService;
use blogdash_view::{AnalyticsView, AuthorBucket, PageView, color_for};

use crate::cli::GlobalOptions;
use crate::output;
use crate::service::CliService;

#[derive(Args, Debug)]
pub struct AnalyticsArgs {
    /// Table page to show (1-based)
    #[arg(long)]
    pub page: Option<usize>,

    /// Print the view as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
pub(crate) struct ColoredBucket<'a> {
    #[serde(flatten)]
    bucket: &'a AuthorBucket,
    color: &'static str,
}

pub(crate) fn with_colors(buckets: &[AuthorBucket]) -> Vec<ColoredBucket<'_>> {
    buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| ColoredBucket {
            bucket,
            color: color_for(i),
        })
        .collect()
}

#[derive(Serialize)]
struct AnalyticsJson<'a> {
    service: &'a str,
    total: usize,
    buckets: Vec<ColoredBucket<'a>>,
    page: &'a PageView,
}

/// Render the full dashboard: charts, then table page and navigation.
pub(crate) fn render(view: &AnalyticsView<CliService>, json: bool) -> Result<()> {
    let buckets = view.buckets();
    let page = view.page();

    if json {
        return output::json_pretty(&AnalyticsJson {
            service: view.service().url().as_str(),
            total: view.snapshot().len(),
            buckets: with_colors(&buckets),
            page: &page,
        });
    }

    output::heading(&format!("Posts per author ({} posts)", view.snapshot().len()));
    output::buckets(&buckets);
    println!();
    output::heading("Posts");
    output::table(&page);
    output::navigation(&page.state);
    Ok(())
}

pub async fn run(args: AnalyticsArgs, global: &GlobalOptions) -> Result<()> {
    let view = super::activate_view(global).await?;
    super::select_page(&view, args.page);
    render(&view, args.json)?;
    super::load_status(&view)
}

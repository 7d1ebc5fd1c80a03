//! Delete command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Id of the post to delete
    pub id: String,

    /// Table page to show after the delete (1-based)
    #[arg(long)]
    pub page: Option<usize>,

    /// Print the refreshed view as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: DeleteArgs, global: &GlobalOptions) -> Result<()> {
    let id = super::parse_id(&args.id)?;
    let view = super::open_view(global).await?;
    super::select_page(&view, args.page);

    if !args.json {
        eprintln!("{}", format!("Deleting post {id}...").dimmed());
    }

    let outcome = view
        .delete(&id)
        .await
        .with_context(|| format!("Failed to delete post {id}"))?;

    if !args.json {
        output::success(&format!("Deleted post {}", outcome.id));
        if !outcome.removed_locally {
            output::warning("Post was not in the loaded collection");
        }
        println!();
    }

    super::analytics::render(&view, args.json)
}

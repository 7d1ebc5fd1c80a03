//! Authors command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::GlobalOptions;
use crate::output;

use super::analytics::with_colors;

#[derive(Args, Debug)]
pub struct AuthorsArgs {
    /// Print the buckets as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: AuthorsArgs, global: &GlobalOptions) -> Result<()> {
    let view = super::activate_view(global).await?;
    let buckets = view.buckets();

    if args.json {
        output::json_pretty(&with_colors(&buckets))?;
    } else {
        output::buckets(&buckets);
    }
    super::load_status(&view)
}

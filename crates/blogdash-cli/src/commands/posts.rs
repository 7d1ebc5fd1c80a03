//! Posts command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::GlobalOptions;
use crate::output;

#[derive(Args, Debug)]
pub struct PostsArgs {
    /// Table page to show (1-based)
    #[arg(long)]
    pub page: Option<usize>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: PostsArgs, global: &GlobalOptions) -> Result<()> {
    let view = super::activate_view(global).await?;
    super::select_page(&view, args.page);
    let page = view.page();

    if args.json {
        output::json_pretty(&*page)?;
    } else {
        output::table(&page);
        output::navigation(&page.state);
    }
    super::load_status(&view)
}

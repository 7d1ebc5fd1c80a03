//! Edit command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::GlobalOptions;
use crate::output;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Id of the post to edit
    pub id: String,
}

pub async fn run(args: EditArgs, global: &GlobalOptions) -> Result<()> {
    let id = super::parse_id(&args.id)?;
    let view = super::open_view(global).await?;

    let request = view.request_edit(&id);
    output::success(&format!("Edit requested for post {}", request.id));

    let snapshot = view.snapshot();
    match snapshot.posts().iter().find(|p| p.id == request.id) {
        Some(post) => {
            output::field("Title", &post.title);
            output::field("Author", post.author_label());
            output::field("Created", &post.display_date());
        }
        None => output::warning("Post is not in the loaded collection"),
    }

    Ok(())
}

//! Reply command - draft a reply to a guest comment.

use anyhow::Result;
use clap::Args;
use console::style;

use super::{Context, parse_metadata};

/// Arguments for the reply command.
#[derive(Args, Debug)]
pub struct ReplyArgs {
    /// User whose session to use
    #[arg(short, long)]
    pub user: String,

    /// The guest comment to reply to
    pub comment: String,

    /// Structured metadata as key=value (hotel_name sets the persona)
    #[arg(short, long = "meta")]
    pub metadata: Vec<String>,
}

/// Run the reply command.
pub async fn run(args: ReplyArgs, ctx: &Context) -> Result<()> {
    let metadata = parse_metadata(&args.metadata)?;
    let manager = ctx.manager()?;

    let session = manager.session(&args.user).await?;
    let reply = session.reply_to_comment(&metadata, &args.comment).await?;

    if ctx.json_output {
        println!("{}", serde_json::json!({ "reply": reply }));
    } else {
        println!("{}", style("Suggested reply").bold());
        println!("{reply}");
    }

    Ok(())
}

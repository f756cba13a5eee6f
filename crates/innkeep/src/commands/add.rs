//! Add command - store one guest comment.

use anyhow::Result;
use clap::Args;
use console::style;

use super::{Context, parse_metadata};

/// Arguments for the add command.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// User the memory belongs to
    #[arg(short, long)]
    pub user: String,

    /// The guest comment text
    pub comment: String,

    /// Structured metadata as key=value (repeatable)
    #[arg(short, long = "meta")]
    pub metadata: Vec<String>,

    /// Tags to attach (repeatable)
    #[arg(short, long)]
    pub tags: Vec<String>,

    /// Also draft a reply to the comment
    #[arg(long)]
    pub auto_reply: bool,
}

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let metadata = parse_metadata(&args.metadata)?;
    let manager = ctx.manager()?;

    let mut session = manager.session(&args.user).await?;
    session
        .add_note(metadata.clone(), &args.comment, args.tags)
        .await?;
    session.save()?;

    let reply = if args.auto_reply {
        Some(session.reply_to_comment(&metadata, &args.comment).await?)
    } else {
        None
    };

    if ctx.json_output {
        println!(
            "{}",
            serde_json::json!({ "status": "added", "reply": reply })
        );
    } else {
        println!("{} memory stored for {}", style("✓").green(), args.user);
        if let Some(reply) = reply {
            println!();
            println!("{}", style("Suggested reply").bold());
            println!("{reply}");
        }
    }

    Ok(())
}

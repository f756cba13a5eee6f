//! Reset command - delete all memories for a user.

use anyhow::Result;
use clap::Args;
use console::style;

use super::Context;

/// Arguments for the reset command.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// User whose memories to delete
    #[arg(short, long)]
    pub user: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Run the reset command.
pub async fn run(args: ResetArgs, ctx: &Context) -> Result<()> {
    if !args.yes && !ctx.json_output {
        eprintln!(
            "This deletes every memory for {}. Pass --yes to confirm.",
            args.user
        );
        return Ok(());
    }

    let manager = ctx.manager()?;
    let mut session = manager.session(&args.user).await?;
    session.reset()?;

    if ctx.json_output {
        println!(
            "{}",
            serde_json::json!({ "status": "reset", "user": args.user })
        );
    } else {
        println!("{} memory for {} has been reset", style("✓").green(), args.user);
    }

    Ok(())
}

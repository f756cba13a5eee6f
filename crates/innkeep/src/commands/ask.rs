//! Ask command - answer a question from retrieved memories.

use anyhow::Result;
use clap::Args;
use console::style;

use super::Context;

/// Arguments for the ask command.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// User whose memories to consult
    #[arg(short, long)]
    pub user: String,

    /// The question to answer
    pub question: String,

    /// How many memories to retrieve as context
    #[arg(short, long)]
    pub k: Option<usize>,

    /// Only use memories for this hotel URL
    #[arg(long)]
    pub url: Option<String>,
}

/// Run the ask command.
pub async fn run(args: AskArgs, ctx: &Context) -> Result<()> {
    let manager = ctx.manager()?;
    let session = manager.session(&args.user).await?;

    let k = args.k.or(Some(ctx.config.search.summary_k));
    let answer = session
        .answer(&args.question, k, args.url.as_deref())
        .await?;

    if ctx.json_output {
        println!("{}", serde_json::json!({ "answer": answer }));
    } else {
        println!("{}", style("Answer").bold());
        println!("{answer}");
    }

    Ok(())
}

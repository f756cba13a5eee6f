//! Summarize command - digest guest reviews for a hotel.

use anyhow::Result;
use clap::{Args, ValueEnum};
use console::{Style, style};

use super::Context;
use innkeep_session::SummaryStyle;

/// Arguments for the summarize command.
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// User whose memories to consult
    #[arg(short, long)]
    pub user: String,

    /// What to summarize (e.g. "what do guests think of the rooms")
    pub question: String,

    /// How many memories to retrieve as context
    #[arg(short, long)]
    pub k: Option<usize>,

    /// Only use memories for this hotel URL
    #[arg(long)]
    pub url: Option<String>,

    /// Summary verbosity
    #[arg(long, value_enum, default_value_t = StyleArg::Detailed)]
    pub style: StyleArg,
}

/// CLI-facing summary style.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StyleArg {
    /// 1-2 sentences, no lists
    Short,
    /// Bullet points allowed
    Detailed,
}

impl From<StyleArg> for SummaryStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Short => SummaryStyle::Short,
            StyleArg::Detailed => SummaryStyle::Detailed,
        }
    }
}

/// Run the summarize command.
pub async fn run(args: SummarizeArgs, ctx: &Context) -> Result<()> {
    let manager = ctx.manager()?;
    let session = manager.session(&args.user).await?;

    let k = args.k.or(Some(ctx.config.search.summary_k));
    let summary = session
        .summarize(&args.question, k, args.url.as_deref(), args.style.into())
        .await?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let dim = Style::new().dim();
        println!(
            "{} {}",
            style("Summary").bold(),
            dim.apply_to(summary.hotel.as_deref().unwrap_or("(hotel unknown)"))
        );
        println!("{}", summary.answer);
    }

    Ok(())
}

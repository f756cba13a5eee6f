//! Search command - semantic search through a user's memories.

use anyhow::Result;
use clap::Args;
use console::{Style, style};

use super::Context;

/// Arguments for the search command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// User whose memories to search
    #[arg(short, long)]
    pub user: String,

    /// Search query
    pub query: String,

    /// Maximum results to return
    #[arg(short, long)]
    pub k: Option<usize>,

    /// Only return memories for this hotel URL
    #[arg(long)]
    pub url: Option<String>,
}

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let manager = ctx.manager()?;
    let session = manager.session(&args.user).await?;

    let k = args.k.or(Some(ctx.config.search.default_k));
    let hits = session.search(&args.query, k, args.url.as_deref()).await?;

    let dim = Style::new().dim();
    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else if hits.is_empty() {
        println!("{}", dim.apply_to("No results found"));
    } else {
        println!("{}", style("Memory Search Results").bold());
        println!("{}", dim.apply_to("─".repeat(50)));
        println!();

        for (i, hit) in hits.iter().enumerate() {
            println!("{}. {}", style(i + 1).cyan(), truncate(&hit.text, 70));
            println!(
                "   {}",
                dim.apply_to(format!(
                    "distance: {:.4}  tags: {}",
                    hit.distance,
                    if hit.tags.is_empty() {
                        "-".to_string()
                    } else {
                        hit.tags.join(", ")
                    }
                ))
            );
            println!();
        }
    }

    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_flattens_and_bounds() {
        assert_eq!(truncate("one\ntwo", 70), "one two");
        let long = "x".repeat(80);
        assert_eq!(truncate(&long, 70).chars().count(), 71);
    }
}

//! Import command - bulk-load reviews from a JSON file.

use anyhow::{Context as _, Result};
use clap::Args;
use console::style;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

use super::Context;
use innkeep_memory::Metadata;

/// Arguments for the import command.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// User the memories belong to
    #[arg(short, long)]
    pub user: String,

    /// JSON file containing an array of reviews
    pub file: PathBuf,
}

/// One review in the import file.
#[derive(Debug, Deserialize)]
pub struct Review {
    /// Source identifier for the hotel; number or string.
    pub hotel_id: serde_json::Value,
    pub hotel_name: String,
    pub location: String,
    pub hotel_url: String,
    pub comment: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Review {
    /// The stored text: hotel context on the first line, comment below.
    pub fn render_text(&self) -> String {
        format!("{} in {}:\n{}", self.hotel_name, self.location, self.comment)
    }

    /// The structured attributes carried alongside the text.
    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("hotel_id".into(), self.hotel_id.clone());
        metadata.insert("hotel_name".into(), self.hotel_name.clone().into());
        metadata.insert("location".into(), self.location.clone().into());
        metadata.insert("hotel_url".into(), self.hotel_url.clone().into());
        metadata
    }
}

/// Run the import command.
pub async fn run(args: ImportArgs, ctx: &Context) -> Result<()> {
    let contents = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let reviews: Vec<Review> = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    let manager = ctx.manager()?;
    let mut session = manager.session(&args.user).await?;

    let count = reviews.len();
    for review in reviews {
        debug!(hotel = %review.hotel_name, "importing review");
        session
            .add_raw(&review.render_text(), review.tags.clone(), review.metadata())
            .await?;
    }
    // One save for the whole batch.
    session.save()?;

    if ctx.json_output {
        println!("{}", serde_json::json!({ "status": "imported", "count": count }));
    } else {
        println!(
            "{} imported {} reviews for {}",
            style("✓").green(),
            count,
            args.user
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_parses_numeric_or_string_ids() {
        let json = r#"[
            {"hotel_id": 7, "hotel_name": "Acme Inn", "location": "Lisbon",
             "hotel_url": "acme.com", "comment": "Great stay", "tags": ["positive"]},
            {"hotel_id": "h-9", "hotel_name": "Beta Lodge", "location": "Porto",
             "hotel_url": "beta.example", "comment": "Fine"}
        ]"#;
        let reviews: Vec<Review> = serde_json::from_str(json).unwrap();
        assert_eq!(reviews.len(), 2);
        assert!(reviews[1].tags.is_empty());
        assert_eq!(reviews[0].metadata()["hotel_url"], "acme.com");
    }

    #[test]
    fn rendered_text_has_hotel_context() {
        let review: Review = serde_json::from_str(
            r#"{"hotel_id": 1, "hotel_name": "Acme Inn", "location": "Lisbon",
                "hotel_url": "acme.com", "comment": "Great stay"}"#,
        )
        .unwrap();
        assert_eq!(review.render_text(), "Acme Inn in Lisbon:\nGreat stay");
    }
}

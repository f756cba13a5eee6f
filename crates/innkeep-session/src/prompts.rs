//! Prompt templates for retrieval-augmented operations.

use crate::session::SummaryStyle;

/// System instruction for all completion calls.
pub const SYSTEM_PROMPT: &str =
    "You are an assistant that answers questions using memory context.";

/// Render retrieved memory texts as bullet context.
pub fn bullet_context<'a>(texts: impl Iterator<Item = &'a str>) -> String {
    texts
        .map(|t| format!("- {t}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt for answering a question over retrieved memories.
pub fn answer_prompt(context: &str, question: &str) -> String {
    format!(
        "You are an AI assistant with access to structured hotel memory.\n\n\
         Context:\n{context}\n\n\
         Question: {question}\n\n\
         Answer:"
    )
}

/// Prompt for summarizing guest reviews for one hotel.
pub fn summary_prompt(hotel_name: Option<&str>, context: &str, style: SummaryStyle) -> String {
    let instruction = match style {
        SummaryStyle::Short => {
            "Summarize the main compliments and complaints in 1-2 sentences. Avoid lists."
        }
        SummaryStyle::Detailed => {
            "Summarize the main compliments and complaints. Use bullet points if needed."
        }
    };

    format!(
        "You are an assistant analyzing guest reviews for a hotel.\n\
         Hotel name: {}\n\n\
         Here are some guest comments:\n{context}\n\n\
         {instruction}",
        hotel_name.unwrap_or("Unknown")
    )
}

/// Prompt for drafting a reply to a guest comment on behalf of the hotel.
pub fn reply_prompt(hotel_name: &str, comment: &str) -> String {
    format!(
        "You are the assistant manager of {hotel_name}. A guest left the following comment:\n\n\
         \"{comment}\"\n\n\
         Rules:\n\
         - Write a polite and concise reply on behalf of the hotel.\n\
         - Write a short thanks reply.\n\
         - Ask the visitor to give a star rating from 0 to 5.\n"
    )
}

//! Editorial prompt and structured-output schema for briefing generation.
//!
//! Cardinalities (six items per news category, three per viral-title
//! category) and bilingual pairing are requested at the prompt level and in
//! the schema description; the generator validates only the terminal
//! success condition, not the exact counts.

/// Requested news items per category.
pub const NEWS_PER_CATEGORY: usize = 6;
/// Requested viral titles per category.
pub const TITLES_PER_CATEGORY: usize = 3;

/// Prompt-level knobs for a briefing.
#[derive(Debug, Clone)]
pub struct PromptConfig {
    /// Language for the `*Local` fields, paired with English.
    pub local_language: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            local_language: "Indonesian".into(),
        }
    }
}

impl PromptConfig {
    /// System instruction: the editorial task and output expectations.
    #[must_use]
    pub fn system_instruction(&self) -> String {
        format!(
            "You are a senior news editor compiling a daily bilingual briefing. \
             Retrieve and summarize real, verifiable news published on the requested date. \
             Respond with a single JSON object and nothing else. \
             Provide exactly {NEWS_PER_CATEGORY} items in generalNews and \
             {NEWS_PER_CATEGORY} items in medicalNews, and exactly \
             {TITLES_PER_CATEGORY} short attention-grabbing titles in each of \
             viralTitles and medicalViralTitles. \
             Every news item must pair {lang} and English: titleLocal/titleEn and \
             summaryLocal/summaryEn must describe the same story. \
             sourceUrl must be the real URL of the published article and sourceName \
             its outlet; never use placeholders.",
            lang = self.local_language,
        )
    }

    /// User instruction embedding the target date.
    #[must_use]
    pub fn user_instruction(&self, target_date: &str) -> String {
        format!(
            "Compile the briefing for {target_date}. Set the \"date\" field to \
             \"{target_date}\". General news first, then medical news."
        )
    }
}

/// JSON schema for the briefing payload, in the provider-neutral
/// lowercase-type form. Provider crates adapt it to their dialect.
#[must_use]
pub fn response_schema() -> serde_json::Value {
    let news_item = serde_json::json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "titleLocal": { "type": "string" },
            "titleEn": { "type": "string" },
            "summaryLocal": { "type": "string" },
            "summaryEn": { "type": "string" },
            "sourceUrl": { "type": "string" },
            "sourceName": { "type": "string" },
        },
        "required": ["titleLocal", "titleEn", "summaryLocal", "summaryEn", "sourceUrl", "sourceName"],
    });

    serde_json::json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "viralTitles": { "type": "array", "items": { "type": "string" } },
            "medicalViralTitles": { "type": "array", "items": { "type": "string" } },
            "generalNews": { "type": "array", "items": news_item },
            "medicalNews": { "type": "array", "items": news_item },
            "date": { "type": "string" },
        },
        "required": ["viralTitles", "medicalViralTitles", "generalNews", "medicalNews", "date"],
    })
}

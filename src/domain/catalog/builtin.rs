use super::entity::{CatalogEntry, ModelId, ValidatorId};

pub(super) fn input_validators() -> Vec<CatalogEntry<ValidatorId>> {
    vec![
        CatalogEntry::new("ends_with", "Ends with \".\""),
        CatalogEntry::new("valid_length", "Length Validation"),
        CatalogEntry::new("detect_pii", "PII Detection"),
        CatalogEntry::new("gibberish_text", "Gibberish Text Detection"),
        CatalogEntry::new("nsfw_text", "NSFW Text Detection"),
        CatalogEntry::new("secrets_present", "Secrets Detection"),
        CatalogEntry::new("toxic_language", "Toxic Text Detection"),
    ]
}

pub(super) fn output_validators() -> Vec<CatalogEntry<ValidatorId>> {
    vec![
        CatalogEntry::new("financial_tone", "Financial Tone Analysis"),
        CatalogEntry::new("guardrails_pii", "PII Guardrails"),
        CatalogEntry::new("has_url", "URL Detection"),
        CatalogEntry::new("mentions_drugs", "Sentiment Analysis"),
        CatalogEntry::new("profanity_filter", "Profanity Filter"),
        CatalogEntry::new("redundant_sentences", "Redundancy Check"),
        CatalogEntry::new("valid_python", "Validate Python"),
        CatalogEntry::new("detect_pii", "PII Detection"),
    ]
}

pub(super) fn models() -> Vec<CatalogEntry<ModelId>> {
    vec![
        CatalogEntry::new("gpt-4o", "GPT-4o"),
        CatalogEntry::new("gpt-4o-mini", "GPT-4o mini"),
        CatalogEntry::new("claude-3-5-sonnet", "Claude 3.5 Sonnet"),
        CatalogEntry::new("llama-3.1-70b", "Llama 3.1 70B"),
    ]
}

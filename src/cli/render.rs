//! Plain-text rendering of catalog entries and keys

use std::fmt::{Display, Write};
use std::hash::Hash;

use crate::domain::{CatalogList, IssuedKey, KeyRecord, ValidatorCatalog, ValidatorId};

pub fn catalog(catalog: &ValidatorCatalog) -> String {
    let mut out = String::new();

    section(&mut out, "Input validators", catalog.input());
    section(&mut out, "Output validators", catalog.output());
    section(&mut out, "Models", catalog.models());

    out
}

fn section<I>(out: &mut String, title: &str, list: &CatalogList<I>)
where
    I: Clone + Eq + Hash + Display,
{
    if list.is_empty() {
        return;
    }

    if !out.is_empty() {
        out.push('\n');
    }

    let _ = writeln!(out, "{}:", title);
    for entry in list.entries() {
        let _ = writeln!(out, "  {:<22} {}", entry.id.to_string(), entry.label);
    }
}

pub fn key_table(keys: &[KeyRecord], show_secrets: bool) -> String {
    if keys.is_empty() {
        return "No keys issued yet.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<24} {:<16} {:<36} {}",
        "KEY ID", "API KEY", "MODEL", "INPUT", "OUTPUT"
    );

    for key in keys {
        let secret = if show_secrets {
            key.api_key.expose().to_string()
        } else {
            key.api_key.masked()
        };

        let _ = writeln!(
            out,
            "{:<10} {:<24} {:<16} {:<36} {}",
            key.key_id.to_string(),
            secret,
            key.model_id.as_ref().map(|m| m.as_str()).unwrap_or("-"),
            join(&key.input_validators),
            join(&key.output_validators),
        );
    }

    out
}

pub fn issued_key(key: &IssuedKey) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Your API key:");
    let _ = writeln!(out, "  {}", key.api_key.expose());
    let _ = writeln!(out, "Please copy and store this key securely.");
    let _ = writeln!(out);
    let _ = writeln!(out, "  input:  {}", join(&key.input_validators));
    let _ = writeln!(out, "  output: {}", join(&key.output_validators));
    if let Some(model) = &key.model_id {
        let _ = writeln!(out, "  model:  {}", model);
    }

    out
}

fn join(ids: &[ValidatorId]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }

    ids.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApiKeySecret, CatalogEntry, KeyId, ModelId};

    fn record() -> KeyRecord {
        KeyRecord {
            key_id: KeyId::Numeric(42),
            api_key: ApiKeySecret::new("sk_live_0123456789"),
            input_validators: vec!["detect_pii".into(), "nsfw_text".into()],
            output_validators: vec!["has_url".into()],
            model_id: None,
        }
    }

    #[test]
    fn test_key_table_masks_by_default() {
        let table = key_table(&[record()], false);

        assert!(table.contains("42"));
        assert!(table.contains("sk_liv..."));
        assert!(!table.contains("sk_live_0123456789"));
        assert!(table.contains("detect_pii,nsfw_text"));
    }

    #[test]
    fn test_key_table_show_secrets() {
        let table = key_table(&[record()], true);
        assert!(table.contains("sk_live_0123456789"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(key_table(&[], false), "No keys issued yet.\n");
    }

    #[test]
    fn test_catalog_lists_every_section() {
        let text = catalog(&ValidatorCatalog::builtin());

        assert!(text.starts_with("Input validators:"));
        assert!(text.contains("Output validators:"));
        assert!(text.contains("Models:"));
        assert_eq!(text.matches("detect_pii").count(), 2);
    }

    #[test]
    fn test_empty_catalog_section_is_skipped() {
        let trimmed = ValidatorCatalog::new(
            [CatalogEntry::<ValidatorId>::new("detect_pii", "Detect PII")],
            [CatalogEntry::<ValidatorId>::new("has_url", "Has URL")],
            Vec::<CatalogEntry<ModelId>>::new(),
        );

        let text = catalog(&trimmed);

        assert!(text.contains("Output validators:"));
        assert!(!text.contains("Models:"));
    }

    #[test]
    fn test_issued_key_shows_full_value() {
        let key = IssuedKey {
            key_id: None,
            api_key: ApiKeySecret::new("sk_new_value"),
            input_validators: vec!["detect_pii".into()],
            output_validators: vec!["has_url".into()],
            model_id: Some("gpt-4o".into()),
        };

        let text = issued_key(&key);
        assert!(text.contains("sk_new_value"));
        assert!(text.contains("model:  gpt-4o"));
    }
}

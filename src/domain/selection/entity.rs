//! Selection entity

use serde::{Deserialize, Serialize};

use super::validation::SelectionError;
use crate::domain::catalog::{ModelId, ValidatorId};

/// Validators and model chosen for a to-be-created key.
///
/// Validator lists behave as sets: a toggle removes an id that is present and
/// appends it otherwise, so duplicates cannot occur. Insertion order is kept
/// only so that submitted requests are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    input_validators: Vec<ValidatorId>,
    output_validators: Vec<ValidatorId>,
    model_id: Option<ModelId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle an input validator; returns whether it is selected afterwards
    pub fn toggle_input(&mut self, id: ValidatorId) -> bool {
        toggle(&mut self.input_validators, id)
    }

    /// Toggle an output validator; returns whether it is selected afterwards
    pub fn toggle_output(&mut self, id: ValidatorId) -> bool {
        toggle(&mut self.output_validators, id)
    }

    /// Replace the model unconditionally
    pub fn set_model(&mut self, id: ModelId) {
        self.model_id = Some(id);
    }

    pub fn clear_model(&mut self) {
        self.model_id = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn input_validators(&self) -> &[ValidatorId] {
        &self.input_validators
    }

    pub fn output_validators(&self) -> &[ValidatorId] {
        &self.output_validators
    }

    pub fn model_id(&self) -> Option<&ModelId> {
        self.model_id.as_ref()
    }

    pub fn has_input(&self, id: &ValidatorId) -> bool {
        self.input_validators.contains(id)
    }

    pub fn has_output(&self, id: &ValidatorId) -> bool {
        self.output_validators.contains(id)
    }

    /// The sole client-side gate before submission
    pub fn validate(&self, require_model: bool) -> Result<(), SelectionError> {
        if self.input_validators.is_empty() {
            return Err(SelectionError::NoInputValidators);
        }

        if self.output_validators.is_empty() {
            return Err(SelectionError::NoOutputValidators);
        }

        if require_model && self.model_id.is_none() {
            return Err(SelectionError::NoModel);
        }

        Ok(())
    }
}

fn toggle(list: &mut Vec<ValidatorId>, id: ValidatorId) -> bool {
    if let Some(pos) = list.iter().position(|v| *v == id) {
        list.remove(pos);
        false
    } else {
        list.push(id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_selection() -> Selection {
        let mut selection = Selection::new();
        selection.toggle_input("detect_pii".into());
        selection.toggle_output("has_url".into());
        selection.set_model("gpt-4o".into());
        selection
    }

    #[test]
    fn test_toggle_parity() {
        let ids = ["detect_pii", "nsfw_text", "detect_pii", "ends_with", "detect_pii", "nsfw_text"];
        let mut selection = Selection::new();

        for id in ids {
            selection.toggle_input(id.into());
        }

        for id in ["detect_pii", "nsfw_text", "ends_with"] {
            let count = ids.iter().filter(|i| **i == id).count();
            assert_eq!(
                selection.has_input(&id.into()),
                count % 2 == 1,
                "membership of {id} after {count} toggles"
            );
        }
    }

    #[test]
    fn test_double_toggle_is_identity() {
        let mut selection = complete_selection();
        let before = selection.clone();

        assert!(selection.toggle_output("valid_python".into()));
        assert!(!selection.toggle_output("valid_python".into()));

        assert_eq!(selection, before);
    }

    #[test]
    fn test_toggle_keeps_insertion_order() {
        let mut selection = Selection::new();
        selection.toggle_input("b".into());
        selection.toggle_input("a".into());
        selection.toggle_input("c".into());
        selection.toggle_input("a".into());

        let ids: Vec<&str> = selection.input_validators().iter().map(|v| v.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_lists_are_independent() {
        let mut selection = Selection::new();
        selection.toggle_input("detect_pii".into());

        assert!(selection.has_input(&"detect_pii".into()));
        assert!(!selection.has_output(&"detect_pii".into()));
    }

    #[test]
    fn test_validate_complete() {
        assert!(complete_selection().validate(true).is_ok());
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(
            Selection::new().validate(true),
            Err(SelectionError::NoInputValidators)
        );
    }

    #[test]
    fn test_validate_missing_output() {
        let mut selection = complete_selection();
        selection.toggle_output("has_url".into());

        assert_eq!(
            selection.validate(true),
            Err(SelectionError::NoOutputValidators)
        );
    }

    #[test]
    fn test_validate_model_requirement() {
        let mut selection = complete_selection();
        selection.clear_model();

        assert_eq!(selection.validate(true), Err(SelectionError::NoModel));
        assert!(selection.validate(false).is_ok());
    }

    #[test]
    fn test_validate_truth_table() {
        for mask in 0u8..8 {
            let mut selection = Selection::new();
            if mask & 1 != 0 {
                selection.toggle_input("detect_pii".into());
            }
            if mask & 2 != 0 {
                selection.toggle_output("has_url".into());
            }
            if mask & 4 != 0 {
                selection.set_model("gpt-4o".into());
            }

            assert_eq!(selection.validate(true).is_ok(), mask == 7, "mask {mask}");
            assert_eq!(selection.validate(false).is_ok(), mask & 3 == 3, "mask {mask}");
        }
    }

    #[test]
    fn test_set_model_replaces() {
        let mut selection = complete_selection();
        selection.set_model("claude-3-5-sonnet".into());

        assert_eq!(selection.model_id().map(|m| m.as_str()), Some("claude-3-5-sonnet"));
    }

    #[test]
    fn test_reset() {
        let mut selection = complete_selection();
        selection.reset();

        assert_eq!(selection, Selection::default());
    }
}

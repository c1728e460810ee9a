//! Selection validation errors

use thiserror::Error;

use crate::domain::catalog::{ModelId, ValidatorId};
use crate::domain::error::KeyError;

/// Which of the two validator lists an id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorList {
    Input,
    Output,
}

impl std::fmt::Display for ValidatorList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// Errors raised by the selection store before anything is submitted
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please select at least one input validator")]
    NoInputValidators,

    #[error("Please select at least one output validator")]
    NoOutputValidators,

    #[error("Please select a model")]
    NoModel,

    #[error("Unknown {list} validator: '{id}'")]
    UnknownValidator { list: ValidatorList, id: ValidatorId },

    #[error("Unknown model: '{0}'")]
    UnknownModel(ModelId),
}

impl From<SelectionError> for KeyError {
    fn from(error: SelectionError) -> Self {
        KeyError::validation(error.to_string())
    }
}

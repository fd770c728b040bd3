//! Draft validation

use crate::model::{Column, InputType, Record, Value};

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field of the offending column
    pub field_name: String,
    pub message: String,
}

impl FieldError {
    fn new(field_name: &str, message: impl Into<String>) -> Self {
        Self {
            field_name: field_name.to_string(),
            message: message.into(),
        }
    }
}

/// Result of validating a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// Every field passed.
    #[default]
    Valid,
    /// One or more fields failed, in column order.
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// All validation errors.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    pub fn first_error(&self) -> Option<&FieldError> {
        self.errors().first()
    }

    /// Errors reported for `field`.
    pub fn errors_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors().iter().filter(move |e| e.field_name == field)
    }
}

/// Check a draft against the column schema. Never modifies the draft.
///
/// - required columns must hold a non-blank value (checkboxes always pass)
/// - number columns must hold a number when non-blank
/// - select columns must hold one of their options when non-blank
///
/// Read-only columns are checked too; a draft may carry them from a
/// snapshot. There are no cross-field rules.
pub fn validate(draft: &Record, columns: &[Column]) -> ValidationResult {
    let mut errors = Vec::new();

    for column in columns {
        let value = draft.get(&column.field).unwrap_or(&Value::Null);

        if value.is_blank() {
            if column.required && column.input_type != InputType::Checkbox {
                errors.push(FieldError::new(
                    &column.field,
                    format!("{} is required", column.label),
                ));
            }
            continue;
        }

        match column.input_type {
            InputType::Number if !value.is_number() => {
                errors.push(FieldError::new(
                    &column.field,
                    format!("{} must be a number", column.label),
                ));
            }
            InputType::Select if !column.options.is_empty() => {
                let text = value.to_string();
                if !column.options.iter().any(|option| *option == text) {
                    errors.push(FieldError::new(
                        &column.field,
                        format!("'{}' is not an option of {}", text, column.label),
                    ));
                }
            }
            _ => {}
        }
    }

    if errors.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(errors)
    }
}

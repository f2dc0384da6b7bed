//! Input validation for resource forms.

use anyhow::Result;
use serde::Serialize;

use crate::model::{Attributes, ModelStore};

/// Alert shown above a form that failed validation.
pub const VALIDATION_ALERT: &str = "Change a few things up and try submitting again.";

/// A single validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value must be present and not blank.
    Required,
    /// Value must not exceed this many characters.
    Max(usize),
    /// No other record may hold the same value in this column.
    Unique,
}

/// Rules keyed by field name, checked in declaration order.
pub type RuleSet = Vec<(String, Vec<Rule>)>;

/// A failed rule for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Collected failures, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for a field, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    fn push(&mut self, field: &str, message: String) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message,
        });
    }
}

/// Validate `input` against `rules`.
///
/// Each field reports at most its first failing rule. Blank values only fail
/// `Required`; the other rules skip them. `except` excludes the record being
/// edited from uniqueness checks.
pub async fn validate(
    store: &ModelStore,
    rules: &RuleSet,
    input: &Attributes,
    except: Option<i64>,
) -> Result<ValidationErrors> {
    let mut errors = ValidationErrors::default();

    for (field, field_rules) in rules {
        let value = input.get(field).map(String::as_str).unwrap_or_default();
        let blank = value.trim().is_empty();
        let attribute = field.replace('_', " ");

        for rule in field_rules {
            let failed = match rule {
                Rule::Required => blank,
                _ if blank => false,
                Rule::Max(max) => value.chars().count() > *max,
                Rule::Unique => store.exists(field, value, except).await?,
            };

            if failed {
                errors.push(field, message(rule, &attribute));
                break;
            }
        }
    }

    Ok(errors)
}

fn message(rule: &Rule, attribute: &str) -> String {
    match rule {
        Rule::Required => format!("The {attribute} field is required."),
        Rule::Max(max) => {
            format!("The {attribute} must not be greater than {max} characters.")
        }
        Rule::Unique => format!("The {attribute} has already been taken."),
    }
}

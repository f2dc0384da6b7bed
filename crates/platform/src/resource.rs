//! The resource contract.
//!
//! A resource pairs a model table with everything the admin screens need to
//! present it: identity (`uri_key`, `label`), navigation metadata (`icon`,
//! `sort`), the fields, columns and legend of its screens, validation rules
//! and the user-facing messages. Only `uri_key`, `label`, `model`, `fields`
//! and `columns` are mandatory; the rest default to the usual wording built
//! from the singular label.

use crate::fields::{Column, Field, Sight};
use crate::model::{ModelSchema, Record};
use crate::validation::RuleSet;

/// Default navigation sort weight.
pub const DEFAULT_SORT: i32 = 2000;

/// Default navigation icon.
pub const DEFAULT_ICON: &str = "folder";

/// Default page size for the list screen.
pub const DEFAULT_PER_PAGE: i64 = 30;

/// A CRUD resource shown in the admin panel.
pub trait Resource: Send + Sync + 'static {
    /// Unique key used in routes, permissions and lookups.
    fn uri_key(&self) -> &str;

    /// Plural, human-readable name.
    fn label(&self) -> &str;

    /// Table backing the resource.
    fn model(&self) -> ModelSchema;

    /// Inputs of the create and edit screens.
    fn fields(&self) -> Vec<Field>;

    /// Columns of the list screen.
    fn columns(&self) -> Vec<Column>;

    /// Rows of the view screen.
    fn legend(&self) -> Vec<Sight> {
        self.fields().iter().map(Sight::from).collect()
    }

    /// Validation rules; `existing` is the record being edited, if any.
    fn rules(&self, _existing: Option<&Record>) -> RuleSet {
        Vec::new()
    }

    fn singular_label(&self) -> String {
        singularize(self.label())
    }

    fn icon(&self) -> &str {
        DEFAULT_ICON
    }

    /// Navigation weight; lower sorts first.
    fn sort(&self) -> i32 {
        DEFAULT_SORT
    }

    fn description(&self) -> Option<String> {
        None
    }

    fn per_page(&self) -> i64 {
        DEFAULT_PER_PAGE
    }

    fn create_button_label(&self) -> String {
        format!("Create {}", self.singular_label())
    }

    fn update_button_label(&self) -> String {
        format!("Update {}", self.singular_label())
    }

    fn delete_button_label(&self) -> String {
        format!("Delete {}", self.singular_label())
    }

    fn create_toast_message(&self) -> String {
        format!("The {} was created!", self.singular_label())
    }

    fn update_toast_message(&self) -> String {
        format!("The {} was updated!", self.singular_label())
    }

    fn delete_toast_message(&self) -> String {
        format!("The {} was deleted!", self.singular_label())
    }

    fn list_breadcrumbs_message(&self) -> String {
        self.label().to_string()
    }

    fn create_breadcrumbs_message(&self) -> String {
        format!("New {}", self.singular_label())
    }

    fn edit_breadcrumbs_message(&self) -> String {
        format!("Edit {}", self.singular_label())
    }
}

/// English singular of a plural label, good enough for regular nouns.
pub fn singularize(label: &str) -> String {
    if let Some(stem) = label.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["sses", "xes", "ches", "shes"] {
        if label.ends_with(suffix) {
            return label[..label.len() - 2].to_string();
        }
    }
    if label.ends_with("ss") {
        return label.to_string();
    }
    label.strip_suffix('s').unwrap_or(label).to_string()
}

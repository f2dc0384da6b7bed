//! Screen building blocks declared by resources.
//!
//! [`Field`] describes one form input on the create/edit screens, [`Column`]
//! one column of the list table and [`Sight`] one row of the view screen.

use serde::Serialize;

/// Kind of form control rendered for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Input,
    TextArea,
}

/// A form input bound to one model attribute.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub title: String,
    pub placeholder: Option<String>,
    pub help: Option<String>,
    /// Visual marker only; enforcement lives in the resource rules.
    pub required: bool,
    /// Rows for text areas.
    pub rows: u32,
}

impl Field {
    /// Single-line text input.
    pub fn input(name: &str) -> Self {
        Self::new(name, FieldKind::Input)
    }

    /// Multi-line text area.
    pub fn textarea(name: &str) -> Self {
        Self {
            rows: 5,
            ..Self::new(name, FieldKind::TextArea)
        }
    }

    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            title: humanize(name),
            placeholder: None,
            help: None,
            required: false,
            rows: 0,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }
}

/// A column of the list table.
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    pub name: String,
    pub title: String,
    /// Render the cell as a link to the view screen.
    pub link: bool,
}

impl Column {
    pub fn make(name: &str) -> Self {
        Self {
            name: name.to_string(),
            title: humanize(name),
            link: false,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn link(mut self) -> Self {
        self.link = true;
        self
    }
}

/// A labelled row of the view screen.
#[derive(Debug, Clone, Serialize)]
pub struct Sight {
    pub name: String,
    pub title: String,
}

impl Sight {
    pub fn make(name: &str) -> Self {
        Self {
            name: name.to_string(),
            title: humanize(name),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }
}

impl From<&Field> for Sight {
    fn from(field: &Field) -> Self {
        Self {
            name: field.name.clone(),
            title: field.title.clone(),
        }
    }
}

/// Turn an attribute name into a title: `created_at` becomes `Created at`.
pub fn humanize(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_replaces_underscores() {
        assert_eq!(humanize("created_at"), "Created at");
        assert_eq!(humanize("title"), "Title");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn textarea_has_default_rows() {
        let field = Field::textarea("body");
        assert_eq!(field.kind, FieldKind::TextArea);
        assert_eq!(field.rows, 5);
        assert_eq!(Field::textarea("body").rows(10).rows, 10);
    }

    #[test]
    fn sight_from_field_keeps_title() {
        let field = Field::input("title").title("Headline");
        let sight = Sight::from(&field);
        assert_eq!(sight.name, "title");
        assert_eq!(sight.title, "Headline");
    }
}

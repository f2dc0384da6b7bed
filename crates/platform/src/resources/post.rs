//! Blog posts.

use crate::fields::{Column, Field, Sight};
use crate::model::{ModelSchema, Record};
use crate::resource::Resource;
use crate::validation::{Rule, RuleSet};

pub struct PostResource;

impl Resource for PostResource {
    fn uri_key(&self) -> &str {
        "posts"
    }

    fn label(&self) -> &str {
        "Posts"
    }

    fn icon(&self) -> &str {
        "book-open"
    }

    fn description(&self) -> Option<String> {
        Some("Articles published on the site.".to_string())
    }

    fn model(&self) -> ModelSchema {
        ModelSchema::new("posts", &["title", "description", "body"])
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            Field::input("title")
                .placeholder("Attractive but mysterious title")
                .help("A string containing the name text and design to attract attention")
                .required(),
            Field::textarea("description")
                .rows(3)
                .placeholder("Brief description for preview")
                .required(),
            Field::textarea("body").rows(10).required(),
        ]
    }

    fn columns(&self) -> Vec<Column> {
        vec![
            Column::make("id").link(),
            Column::make("title").link(),
            Column::make("description"),
            Column::make("created_at").title("Date of creation"),
        ]
    }

    fn legend(&self) -> Vec<Sight> {
        vec![
            Sight::make("id"),
            Sight::make("title"),
            Sight::make("description"),
            Sight::make("body"),
            Sight::make("created_at").title("Date of creation"),
            Sight::make("updated_at").title("Update date"),
        ]
    }

    fn rules(&self, _existing: Option<&Record>) -> RuleSet {
        vec![
            (
                "title".to_string(),
                vec![Rule::Required, Rule::Max(255), Rule::Unique],
            ),
            ("description".to_string(), vec![Rule::Required]),
            ("body".to_string(), vec![Rule::Required]),
        ]
    }
}

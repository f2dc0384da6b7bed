//! Record storage for resource models.
//!
//! Every resource describes its table with a [`ModelSchema`]; all declared
//! columns are stored as text next to an integer primary key and two
//! timestamps. [`ModelStore`] performs the CRUD queries the screens need.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use thiserror::Error;
use tracing::debug;

/// Columns every table carries in addition to the declared ones.
const RESERVED_COLUMNS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Schema definition errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("column '{0}' is managed automatically")]
    ReservedColumn(String),
}

/// Attribute values keyed by column name.
pub type Attributes = BTreeMap<String, String>;

/// Table layout backing a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    table: String,
    columns: Vec<String>,
}

impl ModelSchema {
    pub fn new(table: &str, columns: &[&str]) -> Self {
        Self {
            table: table.to_string(),
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Check that every name is safe to splice into SQL.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if !is_identifier(&self.table) {
            return Err(SchemaError::InvalidIdentifier(self.table.clone()));
        }
        for column in &self.columns {
            if !is_identifier(column) {
                return Err(SchemaError::InvalidIdentifier(column.clone()));
            }
            if RESERVED_COLUMNS.contains(&column.as_str()) {
                return Err(SchemaError::ReservedColumn(column.clone()));
            }
        }
        Ok(())
    }

    fn select_list(&self) -> String {
        let mut parts = vec!["id".to_string()];
        parts.extend(self.columns.iter().map(|c| quote(c)));
        parts.push("created_at".to_string());
        parts.push("updated_at".to_string());
        parts.join(", ")
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn quote(identifier: &str) -> String {
    format!("\"{identifier}\"")
}

/// A stored row.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub id: i64,
    pub attributes: Attributes,
    pub created_at: String,
    pub updated_at: String,
}

impl Record {
    /// Display value for a column, including the managed ones.
    pub fn value(&self, name: &str) -> String {
        match name {
            "id" => self.id.to_string(),
            "created_at" => self.created_at.clone(),
            "updated_at" => self.updated_at.clone(),
            _ => self.attributes.get(name).cloned().unwrap_or_default(),
        }
    }
}

/// One page of records.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub records: Vec<Record>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

impl Page {
    pub fn last_page(&self) -> i64 {
        if self.total == 0 || self.per_page <= 0 {
            1
        } else {
            (self.total + self.per_page - 1) / self.per_page
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page()
    }
}

/// CRUD queries for one model table.
#[derive(Clone)]
pub struct ModelStore {
    pool: SqlitePool,
    schema: ModelSchema,
}

impl ModelStore {
    pub fn new(pool: SqlitePool, schema: ModelSchema) -> Self {
        Self { pool, schema }
    }

    /// Create the table if it does not exist yet.
    pub async fn ensure_table(&self) -> Result<()> {
        self.schema.validate()?;

        let mut columns = vec!["id INTEGER PRIMARY KEY AUTOINCREMENT".to_string()];
        columns.extend(
            self.schema
                .columns
                .iter()
                .map(|c| format!("{} TEXT NOT NULL DEFAULT ''", quote(c))),
        );
        columns.push("created_at TEXT NOT NULL".to_string());
        columns.push("updated_at TEXT NOT NULL".to_string());

        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote(&self.schema.table),
            columns.join(", ")
        );
        sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to create table {}", self.schema.table))?;

        debug!(table = %self.schema.table, "table ready");
        Ok(())
    }

    /// Total number of rows.
    pub async fn count(&self) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote(&self.schema.table));
        let total = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await
            .context("failed to count records")?;
        Ok(total)
    }

    /// Fetch a 1-based page ordered by id.
    ///
    /// Out-of-range page numbers are clamped to the first or last page.
    pub async fn paginate(&self, page: i64, per_page: i64) -> Result<Page> {
        let per_page = per_page.max(1);
        let total = self.count().await?;
        let last_page = ((total + per_page - 1) / per_page).max(1);
        let page = page.clamp(1, last_page);

        let sql = format!(
            "SELECT {} FROM {} ORDER BY id ASC LIMIT ? OFFSET ?",
            self.schema.select_list(),
            quote(&self.schema.table)
        );
        let rows = sqlx::query(&sql)
            .bind(per_page)
            .bind((page - 1) * per_page)
            .fetch_all(&self.pool)
            .await
            .context("failed to list records")?;

        let records = rows
            .iter()
            .map(|row| self.map_row(row))
            .collect::<Result<Vec<_>>>()?;

        Ok(Page {
            records,
            total,
            page,
            per_page,
        })
    }

    pub async fn find(&self, id: i64) -> Result<Option<Record>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            self.schema.select_list(),
            quote(&self.schema.table)
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("failed to fetch record by id")?;

        row.as_ref().map(|r| self.map_row(r)).transpose()
    }

    /// Insert a row; missing attributes are stored empty. Returns the new id.
    pub async fn insert(&self, attributes: &Attributes) -> Result<i64> {
        let now = Utc::now().to_rfc3339();
        let mut names: Vec<String> = self.schema.columns.iter().map(|c| quote(c)).collect();
        names.push("created_at".to_string());
        names.push("updated_at".to_string());
        let placeholders = vec!["?"; names.len()].join(", ");

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote(&self.schema.table),
            names.join(", "),
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for column in &self.schema.columns {
            query = query.bind(attributes.get(column).cloned().unwrap_or_default());
        }
        let result = query
            .bind(now.clone())
            .bind(now)
            .execute(&self.pool)
            .await
            .context("failed to insert record")?;

        let id = result.last_insert_rowid();
        debug!(table = %self.schema.table, id, "record inserted");
        Ok(id)
    }

    /// Overwrite the given attributes. Returns false when the row is gone.
    pub async fn update(&self, id: i64, attributes: &Attributes) -> Result<bool> {
        let columns: Vec<&String> = self
            .schema
            .columns
            .iter()
            .filter(|c| attributes.contains_key(*c))
            .collect();

        let mut assignments: Vec<String> =
            columns.iter().map(|c| format!("{} = ?", quote(c))).collect();
        assignments.push("updated_at = ?".to_string());

        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?",
            quote(&self.schema.table),
            assignments.join(", ")
        );

        let mut query = sqlx::query(&sql);
        for column in columns {
            query = query.bind(attributes.get(column).cloned().unwrap_or_default());
        }
        let result = query
            .bind(Utc::now().to_rfc3339())
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to update record")?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns false when nothing was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", quote(&self.schema.table));
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to delete record")?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether another row already holds `value` in `column`.
    pub async fn exists(&self, column: &str, value: &str, except: Option<i64>) -> Result<bool> {
        if !self.schema.has_column(column) {
            return Err(SchemaError::InvalidIdentifier(column.to_string()).into());
        }

        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = ? AND id != ?",
            quote(&self.schema.table),
            quote(column)
        );
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(value)
            .bind(except.unwrap_or(-1))
            .fetch_one(&self.pool)
            .await
            .context("failed to check uniqueness")?;

        Ok(count > 0)
    }

    fn map_row(&self, row: &SqliteRow) -> Result<Record> {
        let mut attributes = Attributes::new();
        for column in &self.schema.columns {
            let value: Option<String> = row.try_get(column.as_str())?;
            attributes.insert(column.clone(), value.unwrap_or_default());
        }

        Ok(Record {
            id: row.try_get("id")?,
            attributes,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

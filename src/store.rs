use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};

use crate::engine::ArticleRecord;

const ARTICLES_TABLE: &str = "articles";
const CONSULTATIONS_TABLE: &str = "consultations";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationMeta {
    pub title: String,
    pub url: String,
}

/// Read-only view of the consultation database.
pub struct ArticleStore {
    connection: Connection,
}

impl ArticleStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        let connection = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("failed to open database read-only: {}", db_path.display()))?;
        Ok(Self { connection })
    }

    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    pub fn consultation_ids(&self) -> Result<Vec<i64>> {
        let sql = format!(
            "SELECT DISTINCT consultation_id FROM {ARTICLES_TABLE} ORDER BY consultation_id"
        );
        let mut statement = self
            .connection
            .prepare(&sql)
            .context("failed to prepare consultation id query")?;
        let rows = statement
            .query_map([], |row| row.get::<_, i64>(0))
            .context("failed to query consultation ids")?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row.context("failed to decode consultation id")?);
        }
        Ok(ids)
    }

    /// Articles of one consultation in primary-key order. NULL titles and
    /// contents read as empty strings.
    pub fn articles_for(&self, consultation_id: i64) -> Result<Vec<ArticleRecord>> {
        let sql = format!(
            "SELECT id, consultation_id, title, content FROM {ARTICLES_TABLE}
             WHERE consultation_id = ?1 ORDER BY id"
        );
        let mut statement = self
            .connection
            .prepare(&sql)
            .context("failed to prepare article query")?;
        let rows = statement
            .query_map(params![consultation_id], |row| {
                Ok(ArticleRecord {
                    id: row.get(0)?,
                    consultation_id: row.get(1)?,
                    title: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    content: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                })
            })
            .with_context(|| {
                format!("failed to query articles of consultation {consultation_id}")
            })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.with_context(|| {
                format!("failed to decode article row of consultation {consultation_id}")
            })?);
        }
        Ok(records)
    }

    /// Title and url of a consultation, `"N/A"` for whatever is absent.
    pub fn consultation_meta(&self, consultation_id: i64) -> Result<ConsultationMeta> {
        let sql = format!("SELECT title, url FROM {CONSULTATIONS_TABLE} WHERE id = ?1");
        let row = self
            .connection
            .query_row(&sql, params![consultation_id], |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                ))
            })
            .optional()
            .with_context(|| format!("failed to query consultation {consultation_id}"))?;

        let (title, url) = row.unwrap_or_default();
        Ok(ConsultationMeta {
            title: title.unwrap_or_else(|| "N/A".to_string()),
            url: url.unwrap_or_else(|| "N/A".to_string()),
        })
    }
}

#[cfg(test)]
pub(crate) fn seeded_store(seed_sql: &str) -> ArticleStore {
    let connection = Connection::open_in_memory().expect("in-memory DB should open");
    connection
        .execute_batch(
            "
            CREATE TABLE consultations (
              id INTEGER PRIMARY KEY,
              title TEXT,
              url TEXT
            );
            CREATE TABLE articles (
              id INTEGER PRIMARY KEY,
              consultation_id INTEGER NOT NULL,
              title TEXT,
              content TEXT
            );
            ",
        )
        .expect("schema should create");
    connection
        .execute_batch(seed_sql)
        .expect("seed rows should insert");
    ArticleStore::from_connection(connection)
}

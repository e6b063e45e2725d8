//! SQLite storage of frequency tables, point lookups and ad hoc queries.
//!
//! All four sinks insert with `insert or ignore`: writing a record whose key is already
//! stored for the sample is a no-op. Re-ingesting a sample therefore never fails and
//! never changes what is stored.
//!
//! Tables keep the number of subsample columns they were created with. Vectors are
//! padded to it, and a vector with counts beyond it is rejected.

use crate::counter::FrequencyVector;
use crate::errors::{self, Result};
use crate::output::{IntermediateRecord, LemmaRecord, Output, PosRecord, WordformRecord};
use crate::schema::{self, Schema, Table};
use itertools::Itertools;
use log::debug;
use rusqlite::types::{Value, ValueRef};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use std::path::Path;

/// A row of the intermediate table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lookup {
    pub wordform: String,
    pub lemma: String,
    pub pos: String,
    pub total: u64,
}

/// Result of an ad hoc query, every value rendered as text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Number of newly inserted rows per table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Inserted {
    pub wordforms: usize,
    pub lemmas: usize,
    pub pos: usize,
    pub intermediate: usize,
}

pub struct Store {
    conn: Connection,
    schema: Schema,
}

fn text(s: &str) -> Value {
    Value::Text(s.to_owned())
}

fn count(x: u64) -> Value {
    Value::Integer(x as i64)
}

fn render(value: ValueRef) -> String {
    match value {
        ValueRef::Null => "NULL".to_owned(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

impl Store {
    pub fn open(path: impl AsRef<Path>, schema: Schema) -> Result<Store> {
        let conn = Connection::open(path)?;
        Ok(Store { conn, schema })
    }

    pub fn open_in_memory(schema: Schema) -> Result<Store> {
        let conn = Connection::open_in_memory()?;
        Ok(Store { conn, schema })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn create_tables(&self, sample: &str) -> Result<()> {
        schema::check_sample(sample)?;
        for table in Table::ALL {
            self.conn
                .execute(&self.schema.create_statement(sample, table), [])?;
        }
        Ok(())
    }

    /// Number of subsample columns of a stored table, `None` if there is no such table.
    fn stored_capacity(&self, name: &str) -> Result<Option<usize>> {
        let sql = format!("pragma table_info({})", schema::quote(name));
        let mut stmt = self.conn.prepare(&sql)?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        if columns.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            columns.iter().filter(|c| c.starts_with("subsample_")).count(),
        ))
    }

    /// Layout of a table as stored. A table created by an earlier run keeps its own
    /// capacity; only new tables get the configured one.
    fn table_schema(&self, sample: &str, table: Table) -> Result<Schema> {
        let name = self.schema.table_name(sample, table);
        match self.stored_capacity(&name)? {
            Some(capacity) if capacity != self.schema.capacity => {
                debug!(
                    target: "ukrfreq",
                    "{}: stored with {} subsample columns, configured {}",
                    name,
                    capacity,
                    self.schema.capacity
                );
                Ok(Schema::new(capacity))
            }
            _ => Ok(self.schema),
        }
    }

    fn insert_rows(
        &mut self,
        sample: &str,
        table: Table,
        rows: Vec<(Vec<Value>, &FrequencyVector)>,
    ) -> Result<usize> {
        schema::check_sample(sample)?;
        let layout = self.table_schema(sample, table)?;
        let rows = rows
            .into_iter()
            .map(|(leading, vector)| -> Result<Vec<Value>> {
                let slots = layout.fit(vector)?;
                Ok(leading
                    .into_iter()
                    .chain(slots.into_iter().map(count))
                    .collect_vec())
            })
            .collect::<Result<Vec<Vec<Value>>>>()?;
        let sql = layout.insert_statement(sample, table);
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(&sql)?;
            for row in &rows {
                inserted += stmt.execute(params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;
        debug!(
            target: "ukrfreq",
            "{}: {} of {} rows inserted",
            layout.table_name(sample, table),
            inserted,
            rows.len()
        );
        Ok(inserted)
    }

    pub fn write_wordforms(&mut self, sample: &str, records: &[WordformRecord]) -> Result<usize> {
        let rows = records
            .iter()
            .map(|r| (vec![text(&r.wordform), count(r.total)], &r.vector))
            .collect_vec();
        self.insert_rows(sample, Table::Wordforms, rows)
    }

    pub fn write_lemmas(&mut self, sample: &str, records: &[LemmaRecord]) -> Result<usize> {
        let rows = records
            .iter()
            .map(|r| {
                (
                    vec![text(&r.lemma), text(r.pos.label()), count(r.total)],
                    &r.vector,
                )
            })
            .collect_vec();
        self.insert_rows(sample, Table::Lemmas, rows)
    }

    pub fn write_pos(&mut self, sample: &str, records: &[PosRecord]) -> Result<usize> {
        let rows = records
            .iter()
            .map(|r| (vec![text(r.pos.label()), count(r.total)], &r.vector))
            .collect_vec();
        self.insert_rows(sample, Table::Pos, rows)
    }

    pub fn write_intermediate(
        &mut self,
        sample: &str,
        records: &[IntermediateRecord],
    ) -> Result<usize> {
        let rows = records
            .iter()
            .map(|r| {
                (
                    vec![
                        text(&r.wordform),
                        text(&r.lemma),
                        text(r.pos.label()),
                        count(r.total),
                    ],
                    &r.vector,
                )
            })
            .collect_vec();
        self.insert_rows(sample, Table::Intermediate, rows)
    }

    /// Create the tables of a sample and write all records of a run.
    pub fn write_output(&mut self, sample: &str, output: &Output) -> Result<Inserted> {
        self.create_tables(sample)?;
        Ok(Inserted {
            wordforms: self.write_wordforms(sample, &output.wordforms)?,
            lemmas: self.write_lemmas(sample, &output.lemmas)?,
            pos: self.write_pos(sample, &output.pos)?,
            intermediate: self.write_intermediate(sample, &output.intermediate)?,
        })
    }

    fn has_table(&self, name: &str) -> Result<bool> {
        let n: i64 = self.conn.query_row(
            "select count(*) from sqlite_master where type = 'table' and name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(n > 0)
    }

    /// Identifiers of all samples with stored tables, sorted.
    pub fn samples(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("select name from sqlite_master where type = 'table'")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        let suffix = format!("_{}", Table::Intermediate.suffix());
        Ok(names
            .iter()
            .filter_map(|n| n.strip_suffix(&suffix))
            .map(|s| s.to_owned())
            .sorted()
            .collect_vec())
    }

    /// Look up one wordform of a sample.
    pub fn lookup(&self, sample: &str, wordform: &str) -> Result<Option<Lookup>> {
        schema::check_sample(sample)?;
        let table = self.schema.table_name(sample, Table::Intermediate);
        if !self.has_table(&table)? {
            return Err(errors::unknown_sample(sample));
        }
        let sql = format!(
            "select wordform, lemma, pos, total from {} where wordform = ?1",
            schema::quote(&table)
        );
        let found = self
            .conn
            .query_row(&sql, params![wordform], |row| {
                Ok(Lookup {
                    wordform: row.get(0)?,
                    lemma: row.get(1)?,
                    pos: row.get(2)?,
                    total: row.get::<_, i64>(3)? as u64,
                })
            })
            .optional()?;
        Ok(found)
    }

    /// Run arbitrary SQL and return all rows as they are.
    pub fn query(&self, sql: &str) -> Result<QueryResult> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns = stmt
            .column_names()
            .iter()
            .map(|c| c.to_string())
            .collect_vec();
        let ncols = columns.len();
        let mut rows = vec![];
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let mut values = Vec::with_capacity(ncols);
            for i in 0..ncols {
                values.push(render(row.get_ref(i)?));
            }
            rows.push(values);
        }
        Ok(QueryResult { columns, rows })
    }
}

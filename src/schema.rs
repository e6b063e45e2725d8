//! Table layout of the frequency database.
//!
//! Every sample gets four tables whose names start with the sample identifier. Each
//! table has one integer column per subsample slot; the number of slots is a fixed
//! capacity, independent of how many subsamples a particular corpus produced.

use crate::counter::FrequencyVector;
use crate::errors::{self, Result};
use itertools::Itertools;

/// Default number of subsample columns.
pub const DEFAULT_CAPACITY: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Table {
    Wordforms,
    Lemmas,
    Pos,
    Intermediate,
}

impl Table {
    pub const ALL: [Table; 4] = [Table::Wordforms, Table::Lemmas, Table::Pos, Table::Intermediate];

    pub fn suffix(self) -> &'static str {
        match self {
            Table::Wordforms => "wordforms",
            Table::Lemmas => "lemmas",
            Table::Pos => "pos",
            Table::Intermediate => "intermediate",
        }
    }

    /// Columns before the subsample columns. The first one is the primary key.
    pub fn leading_columns(self) -> &'static [&'static str] {
        match self {
            Table::Wordforms => &["wordform", "total"],
            Table::Lemmas => &["lemma", "pos", "total"],
            Table::Pos => &["pos", "total"],
            Table::Intermediate => &["wordform", "lemma", "pos", "total"],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schema {
    pub capacity: usize,
}

impl Default for Schema {
    fn default() -> Schema {
        Schema {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Sample identifiers become part of table names: letters, digits and `_` only.
pub fn check_sample(sample: &str) -> Result<()> {
    if sample.is_empty() {
        return Err(errors::invalid_argument_ref("empty sample identifier"));
    }
    if !sample.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(errors::invalid_argument(format!(
            "sample identifier '{sample}' may only contain letters, digits and '_'"
        )));
    }
    Ok(())
}

pub fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

impl Schema {
    pub fn new(capacity: usize) -> Schema {
        Schema { capacity }
    }

    /// `subsample_1` to `subsample_N`.
    pub fn subsample_columns(&self) -> Vec<String> {
        (1..=self.capacity)
            .map(|i| format!("subsample_{i}"))
            .collect_vec()
    }

    pub fn table_name(&self, sample: &str, table: Table) -> String {
        format!("{}_{}", sample, table.suffix())
    }

    pub fn columns(&self, table: Table) -> Vec<String> {
        table
            .leading_columns()
            .iter()
            .map(|c| c.to_string())
            .chain(self.subsample_columns())
            .collect_vec()
    }

    pub fn create_statement(&self, sample: &str, table: Table) -> String {
        let leading = table.leading_columns();
        let mut columns = vec![format!("{} text primary key", leading[0])];
        for &c in &leading[1..] {
            let kind = if c == "total" { "integer" } else { "text" };
            columns.push(format!("{c} {kind}"));
        }
        for c in self.subsample_columns() {
            columns.push(format!("{c} integer not null default 0"));
        }
        format!(
            "create table if not exists {} ({})",
            quote(&self.table_name(sample, table)),
            columns.join(", ")
        )
    }

    /// Duplicate primary keys are skipped.
    pub fn insert_statement(&self, sample: &str, table: Table) -> String {
        let columns = self.columns(table);
        let placeholders = (1..=columns.len()).map(|i| format!("?{i}")).join(", ");
        format!(
            "insert or ignore into {} ({}) values ({})",
            quote(&self.table_name(sample, table)),
            columns.join(", "),
            placeholders
        )
    }

    /// Pad or cut a vector to exactly `capacity` slots. Cutting non-zero counts is an
    /// error.
    pub fn fit(&self, vector: &FrequencyVector) -> Result<Vec<u64>> {
        let slots = vector.slots();
        if slots.len() > self.capacity && slots[self.capacity..].iter().any(|&x| x > 0) {
            return Err(errors::invalid_argument(format!(
                "vector of width {} has counts beyond the {} subsample columns of the table",
                slots.len(),
                self.capacity
            )));
        }
        let mut fitted = slots.iter().copied().take(self.capacity).collect_vec();
        fitted.resize(self.capacity, 0);
        Ok(fitted)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn subsample_columns_basic() {
        let schema = Schema::new(3);
        assert_eq!(
            schema.subsample_columns(),
            vec!["subsample_1", "subsample_2", "subsample_3"]
        );
        assert_eq!(Schema::default().subsample_columns().len(), 20);
    }

    #[test]
    fn columns_basic() {
        let schema = Schema::new(2);
        assert_eq!(
            schema.columns(Table::Lemmas),
            vec!["lemma", "pos", "total", "subsample_1", "subsample_2"]
        );
        assert_eq!(
            schema.columns(Table::Intermediate),
            vec!["wordform", "lemma", "pos", "total", "subsample_1", "subsample_2"]
        );
    }

    #[test]
    fn create_statement_basic() {
        let schema = Schema::new(2);
        assert_eq!(
            schema.create_statement("s1", Table::Pos),
            "create table if not exists \"s1_pos\" (pos text primary key, total integer, \
             subsample_1 integer not null default 0, subsample_2 integer not null default 0)"
        );
    }

    #[test]
    fn insert_statement_basic() {
        let schema = Schema::new(1);
        assert_eq!(
            schema.insert_statement("s1", Table::Wordforms),
            "insert or ignore into \"s1_wordforms\" (wordform, total, subsample_1) values (?1, ?2, ?3)"
        );
    }

    #[test]
    fn fit_pads_and_cuts() {
        let schema = Schema::new(4);
        let v = FrequencyVector::from(vec![1, 2]);
        assert_eq!(schema.fit(&v).unwrap(), vec![1, 2, 0, 0]);
        let v = FrequencyVector::from(vec![1, 2, 3, 4, 0, 0]);
        assert_eq!(schema.fit(&v).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn fit_refuses_to_drop_counts() {
        let schema = Schema::new(2);
        let v = FrequencyVector::from(vec![1, 0, 3]);
        let e = schema.fit(&v).err().unwrap();
        assert_eq!(
            e.to_string(),
            "invalid argument: vector of width 3 has counts beyond the 2 subsample columns of the table"
        );
    }

    #[test]
    fn leading_columns_start_with_key() {
        assert_eq!(Table::Wordforms.leading_columns()[0], "wordform");
        assert_eq!(Table::Lemmas.leading_columns(), &["lemma", "pos", "total"]);
        for table in Table::ALL {
            assert_eq!(table.leading_columns().last(), Some(&"total"));
        }
    }

    #[test]
    fn check_sample_basic() {
        assert!(check_sample("s1").is_ok());
        assert!(check_sample("корпус_2024").is_ok());
        assert!(check_sample("").is_err());
        assert!(check_sample("s1; drop table x").is_err());
        assert!(check_sample("a-b").is_err());
    }

    #[test]
    fn quote_basic() {
        assert_eq!(quote("s1_pos"), "\"s1_pos\"");
        assert_eq!(quote("a\"b"), "\"a\"\"b\"");
    }
}

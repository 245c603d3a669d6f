//! One-hot encoding of categorical fields against fitted category tables.
//!
//! All four categorical fields share the same [`CategoricalEncoder`]; only the
//! table differs. Tables are read from the JSON artifacts written by the
//! training pipeline and never change after start-up.

use std::collections::{BTreeMap, HashSet};
use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EncodingError, TableError};

/// Known labels for one categorical feature, in fitted order.
///
/// Only built through [`CategoryTable::new`], [`CategoryTable::load`] or
/// deserialization, all of which reject empty and duplicate label lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableFile")]
pub struct CategoryTable {
    feature: String,
    categories: Vec<String>,
}

/// On-disk shape of an encoder artifact, before validation.
#[derive(Deserialize)]
struct TableFile {
    feature: String,
    categories: Vec<String>,
}

impl TryFrom<TableFile> for CategoryTable {
    type Error = TableError;

    fn try_from(file: TableFile) -> Result<Self, Self::Error> {
        Self::new(file.feature, file.categories)
    }
}

impl CategoryTable {
    pub fn new(
        feature: impl Into<String>,
        categories: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, TableError> {
        let table = Self {
            feature: feature.into(),
            categories: categories.into_iter().map(Into::into).collect(),
        };
        table.check()?;
        Ok(table)
    }

    /// Load a table from a JSON artifact of shape
    /// `{"feature": "...", "categories": ["...", ...]}`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let text = read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: TableFile = serde_json::from_str(&text).map_err(|source| TableError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(file.feature, file.categories)
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    fn check(&self) -> Result<(), TableError> {
        if self.categories.is_empty() {
            return Err(TableError::Empty(self.feature.clone()));
        }
        let mut seen = HashSet::new();
        for c in &self.categories {
            if !seen.insert(c.as_str()) {
                return Err(TableError::DuplicateCategory {
                    feature: self.feature.clone(),
                    category: c.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Maps a category label onto its one-hot vector.
#[derive(Debug, Clone)]
pub struct CategoricalEncoder {
    table: CategoryTable,
}

impl CategoricalEncoder {
    pub fn new(table: CategoryTable) -> Self {
        Self { table }
    }

    pub fn feature(&self) -> &str {
        &self.table.feature
    }

    pub fn categories(&self) -> &[String] {
        &self.table.categories
    }

    /// Width of the encoded block.
    pub fn width(&self) -> usize {
        self.table.categories.len()
    }

    pub fn encode(&self, value: &str) -> Result<Vec<f64>, EncodingError> {
        let idx = self
            .table
            .categories
            .iter()
            .position(|c| c == value)
            .ok_or_else(|| EncodingError::UnknownCategory {
                feature: self.table.feature.clone(),
                value: value.to_string(),
                known: self.table.categories.clone(),
            })?;
        let mut out = vec![0.0; self.width()];
        out[idx] = 1.0;
        Ok(out)
    }

    /// Recover the label from a one-hot block; `None` unless exactly one
    /// position holds 1 and the rest hold 0.
    pub fn decode(&self, encoded: &[f64]) -> Option<&str> {
        if encoded.len() != self.width() {
            return None;
        }
        let mut hot = None;
        for (i, &v) in encoded.iter().enumerate() {
            if v == 1.0 && hot.is_none() {
                hot = Some(i);
            } else if v != 0.0 {
                return None;
            }
        }
        hot.map(|i| self.table.categories[i].as_str())
    }

    /// Column names of the encoded block, `<feature>_<category>`.
    pub fn feature_names(&self) -> impl Iterator<Item = String> + '_ {
        self.table
            .categories
            .iter()
            .map(move |c| format!("{}_{}", self.table.feature, c))
    }
}

/// One encoder per categorical feature, keyed by training column name.
#[derive(Debug, Clone, Default)]
pub struct EncoderSet {
    encoders: BTreeMap<String, CategoricalEncoder>,
}

impl EncoderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: impl IntoIterator<Item = CategoryTable>) -> Self {
        let mut set = Self::new();
        for table in tables {
            set.insert(CategoricalEncoder::new(table));
        }
        set
    }

    /// Load the four fitted encoder artifacts from `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, TableError> {
        let dir = dir.as_ref();
        let mut tables = Vec::with_capacity(ARTIFACT_FILES.len());
        for (column, file) in ARTIFACT_FILES {
            let table = CategoryTable::load(dir.join(file))?;
            if table.feature != column {
                log::warn!(
                    "encoder artifact {file} names feature {:?}; using it for {column}",
                    table.feature
                );
            }
            log::debug!("loaded {} categories for {column}", table.categories.len());
            tables.push(CategoryTable {
                feature: column.to_string(),
                categories: table.categories,
            });
        }
        Ok(Self::from_tables(tables))
    }

    pub fn insert(&mut self, encoder: CategoricalEncoder) -> Option<CategoricalEncoder> {
        self.encoders.insert(encoder.feature().to_string(), encoder)
    }

    pub fn get(&self, feature: &str) -> Option<&CategoricalEncoder> {
        self.encoders.get(feature)
    }

    pub fn encode(&self, feature: &str, value: &str) -> Result<Vec<f64>, EncodingError> {
        self.get(feature)
            .ok_or_else(|| EncodingError::UnknownFeature(feature.to_string()))?
            .encode(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoricalEncoder> {
        self.encoders.values()
    }
}

/// Training column -> artifact file name written by the training pipeline.
pub const ARTIFACT_FILES: [(&str, &str); 4] = [
    ("home_ownership", "ohe_home_ownership.json"),
    ("loan_intent", "ohe_loan_intent.json"),
    ("loan_grade", "ohe_loan_grade.json"),
    ("default_onfile", "ohe_default_on_file.json"),
];

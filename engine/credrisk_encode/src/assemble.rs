//! Feature assembly: raw record in, model-ready feature row out.
//!
//! The layout is numeric columns in [`NUMERIC_COLUMNS`] order followed by the
//! one-hot blocks of [`CATEGORICAL_COLUMNS`]. The layout is computed once and
//! compared against the scorer's trained feature names at start-up.

use crate::encoder::{CategoricalEncoder, EncoderSet};
use crate::error::{AssembleError, EncodingError, SchemaError, TableError};
use crate::record::{rename, Cell, Column, RawRecord};
use crate::schema::{external_name, CATEGORICAL_COLUMNS, NUMERIC_COLUMNS};

/// Ordered column names of an assembled feature row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureLayout {
    columns: Vec<String>,
}

impl FeatureLayout {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// First position where `other` disagrees with this layout, if any.
    pub fn first_mismatch(&self, other: &[String]) -> Option<usize> {
        if self.columns.as_slice() == other {
            return None;
        }
        let common = self.columns.len().min(other.len());
        Some(
            (0..common)
                .find(|&i| self.columns[i] != other[i])
                .unwrap_or(common),
        )
    }
}

/// A single model-ready feature row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }
}

/// Turns validated records into feature vectors using fitted encoders.
#[derive(Debug, Clone)]
pub struct FeatureAssembler {
    encoders: EncoderSet,
    layout: FeatureLayout,
}

impl FeatureAssembler {
    /// Fails if any categorical column lacks an encoder.
    pub fn new(encoders: EncoderSet) -> Result<Self, TableError> {
        let mut columns: Vec<String> = NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect();
        for column in CATEGORICAL_COLUMNS {
            let encoder = encoders
                .get(column)
                .ok_or_else(|| TableError::MissingEncoder(column.to_string()))?;
            columns.extend(encoder.feature_names());
        }
        Ok(Self {
            encoders,
            layout: FeatureLayout { columns },
        })
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    pub fn encoders(&self) -> &EncoderSet {
        &self.encoders
    }

    pub fn assemble(&self, record: &RawRecord) -> Result<FeatureVector, AssembleError> {
        let columns = rename(record.validate()?);

        let mut values = Vec::with_capacity(self.layout.len());
        for name in NUMERIC_COLUMNS {
            match find(&columns, name)? {
                Cell::Number(v) => values.push(*v),
                Cell::Category(s) => return Err(mismatch(name, "a number", s).into()),
            }
        }
        for name in CATEGORICAL_COLUMNS {
            let encoder = self.encoder(name)?;
            match find(&columns, name)? {
                Cell::Category(s) => values.extend(encoder.encode(s)?),
                Cell::Number(v) => {
                    return Err(mismatch(name, "a string", &v.to_string()).into())
                }
            }
        }

        debug_assert_eq!(values.len(), self.layout.len());
        Ok(FeatureVector { values })
    }

    fn encoder(&self, column: &str) -> Result<&CategoricalEncoder, EncodingError> {
        self.encoders
            .get(column)
            .ok_or_else(|| EncodingError::UnknownFeature(column.to_string()))
    }
}

fn find<'a>(columns: &'a [Column], name: &str) -> Result<&'a Cell, SchemaError> {
    columns
        .iter()
        .find(|c| c.name == name)
        .map(|c| &c.cell)
        .ok_or_else(|| SchemaError::MissingField(external_name(name).to_string()))
}

fn mismatch(column: &str, expected: &'static str, found: &str) -> SchemaError {
    SchemaError::TypeMismatch {
        field: external_name(column).to_string(),
        expected,
        found: found.to_string(),
    }
}

//! Record validation, categorical encoding and feature assembly for credrisk.
//!
//! A [`RawRecord`] is validated against the wire schema, renamed onto the
//! training column names, has its categorical fields replaced by one-hot
//! blocks and is flattened into a [`FeatureVector`] whose layout matches the
//! column order the scorer was fit on.

pub mod assemble;
pub mod encoder;
pub mod error;
pub mod record;
pub mod schema;

pub use assemble::{FeatureAssembler, FeatureLayout, FeatureVector};
pub use encoder::{CategoricalEncoder, CategoryTable, EncoderSet, ARTIFACT_FILES};
pub use error::{AssembleError, EncodingError, SchemaError, TableError};
pub use record::{Cell, Column, LoanApplication, RawRecord};
pub use schema::{FieldKind, InputField, CATEGORICAL_COLUMNS, INPUT_FIELDS, NUMERIC_COLUMNS, RENAMES};

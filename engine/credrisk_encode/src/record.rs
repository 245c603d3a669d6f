//! Raw loan application records and their coercion into typed cells

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::schema::{training_name, FieldKind, InputField, INPUT_FIELDS};

/// A loan application exactly as callers send it over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub person_age: i64,
    pub person_income: i64,
    pub person_home_ownership: String,
    pub person_emp_lenght: f64,
    pub loan_intent: String,
    pub loan_grade: String,
    pub loan_amnt: i64,
    pub loan_int_rate: f64,
    pub loan_percent_income: f64,
    pub cb_person_default_on_file: String,
    pub cb_person_cred_hist_length: i64,
}

/// One incoming record, kept as the untyped JSON object it arrived as.
///
/// Field order and unknown extra fields carry no meaning; only the names in
/// [`INPUT_FIELDS`] are read.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    fields: Map<String, Value>,
}

impl RawRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn from_json(value: Value) -> Result<Self, SchemaError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(SchemaError::NotAnObject(json_type(&other))),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Check the record against [`INPUT_FIELDS`] and coerce every field.
    /// Columns come back in declaration order whatever the arrival order was.
    pub fn validate(&self) -> Result<Vec<Column>, SchemaError> {
        INPUT_FIELDS
            .iter()
            .map(|field| {
                let raw = self
                    .fields
                    .get(field.name)
                    .ok_or_else(|| SchemaError::MissingField(field.name.to_string()))?;
                Ok(Column {
                    name: field.name,
                    cell: coerce(field, raw)?,
                })
            })
            .collect()
    }
}

impl From<&LoanApplication> for RawRecord {
    fn from(app: &LoanApplication) -> Self {
        let mut fields = Map::new();
        let mut put = |name: &str, value: Value| {
            fields.insert(name.to_string(), value);
        };
        put("person_age", app.person_age.into());
        put("person_income", app.person_income.into());
        put("person_home_ownership", app.person_home_ownership.clone().into());
        put("person_emp_lenght", app.person_emp_lenght.into());
        put("loan_intent", app.loan_intent.clone().into());
        put("loan_grade", app.loan_grade.clone().into());
        put("loan_amnt", app.loan_amnt.into());
        put("loan_int_rate", app.loan_int_rate.into());
        put("loan_percent_income", app.loan_percent_income.into());
        put(
            "cb_person_default_on_file",
            app.cb_person_default_on_file.clone().into(),
        );
        put(
            "cb_person_cred_hist_length",
            app.cb_person_cred_hist_length.into(),
        );
        Self { fields }
    }
}

/// A coerced field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Category(String),
}

/// A named, coerced field. The name is external until [`rename`] runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: &'static str,
    pub cell: Cell,
}

/// Apply the rename table so every column carries its training name.
pub fn rename(columns: Vec<Column>) -> Vec<Column> {
    columns
        .into_iter()
        .map(|col| Column {
            name: training_name(col.name),
            cell: col.cell,
        })
        .collect()
}

fn coerce(field: &InputField, raw: &Value) -> Result<Cell, SchemaError> {
    let mismatch = || SchemaError::TypeMismatch {
        field: field.name.to_string(),
        expected: field.kind.expected(),
        found: describe(raw),
    };
    match field.kind {
        FieldKind::Integer => as_integer(raw).map(Cell::Number).ok_or_else(mismatch),
        FieldKind::Float => as_float(raw).map(Cell::Number).ok_or_else(mismatch),
        FieldKind::Category => raw
            .as_str()
            .map(|s| Cell::Category(s.to_string()))
            .ok_or_else(mismatch),
    }
}

fn as_integer(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i as f64)
            } else {
                n.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0)
            }
        }
        Value::String(s) => s.trim().parse::<i64>().ok().map(|i| i as f64),
        _ => None,
    }
}

fn as_float(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|f| f.is_finite())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Number(_) | Value::String(_) => format!("{} ({value})", json_type(value)),
        _ => json_type(value).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "person_age": 30,
            "person_income": 50000,
            "person_home_ownership": "RENT",
            "person_emp_lenght": 5.0,
            "loan_intent": "EDUCATION",
            "loan_grade": "B",
            "loan_amnt": 10000,
            "loan_int_rate": 10.0,
            "loan_percent_income": 0.2,
            "cb_person_default_on_file": "N",
            "cb_person_cred_hist_length": 3,
            "loan_status": 0
        })
    }

    #[test]
    fn validate_coerces_and_ignores_extras() {
        let record = RawRecord::from_json(sample()).unwrap();
        let cols = record.validate().unwrap();
        assert_eq!(cols.len(), INPUT_FIELDS.len());
        assert_eq!(cols[0].cell, Cell::Number(30.0));
        assert_eq!(cols[2].cell, Cell::Category("RENT".into()));
        assert!(cols.iter().all(|c| c.name != "loan_status"));
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let mut value = sample();
        value["person_age"] = json!("41");
        value["loan_int_rate"] = json!("11.5");
        value["loan_amnt"] = json!(12000.0);
        let cols = RawRecord::from_json(value).unwrap().validate().unwrap();
        assert_eq!(cols[0].cell, Cell::Number(41.0));
        assert_eq!(cols[6].cell, Cell::Number(12000.0));
        assert_eq!(cols[7].cell, Cell::Number(11.5));
    }

    #[test]
    fn fractional_integer_is_rejected() {
        let mut value = sample();
        value["person_age"] = json!(30.5);
        let err = RawRecord::from_json(value).unwrap().validate().unwrap_err();
        assert!(matches!(err, SchemaError::TypeMismatch { ref field, .. } if field == "person_age"));
    }

    #[test]
    fn category_must_be_a_string() {
        let mut value = sample();
        value["loan_grade"] = json!(2);
        let err = RawRecord::from_json(value).unwrap().validate().unwrap_err();
        assert_eq!(
            err,
            SchemaError::TypeMismatch {
                field: "loan_grade".into(),
                expected: "a string",
                found: "a number (2)".into(),
            }
        );
    }

    #[test]
    fn missing_field_is_reported_by_external_name() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("person_emp_lenght");
        let err = RawRecord::from_json(value).unwrap().validate().unwrap_err();
        assert_eq!(err, SchemaError::MissingField("person_emp_lenght".into()));
    }

    #[test]
    fn non_object_is_rejected() {
        assert_eq!(
            RawRecord::from_json(json!([1, 2])).unwrap_err(),
            SchemaError::NotAnObject("an array")
        );
    }

    #[test]
    fn rename_uses_training_names() {
        let cols = RawRecord::from_json(sample()).unwrap().validate().unwrap();
        let names: Vec<&str> = rename(cols).iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "person_age",
                "person_income",
                "home_ownership",
                "person_emp_length",
                "loan_intent",
                "loan_grade",
                "loan_amnt",
                "loan_int_rate",
                "loan_percent_income",
                "default_onfile",
                "cb_person_cred_hist_length",
            ]
        );
    }

    #[test]
    fn typed_application_matches_wire_shape() {
        let app: LoanApplication = serde_json::from_value(sample()).unwrap();
        let record = RawRecord::from(&app);
        assert_eq!(
            record.validate().unwrap(),
            RawRecord::from_json(sample()).unwrap().validate().unwrap()
        );
    }
}

//! Wire schema of a loan application and its mapping onto training columns.
//!
//! The public field names are fixed by existing callers (including the
//! misspelled `person_emp_lenght`). The model was fit on a slightly different
//! set of column names; [`RENAMES`] is the single place that bridges the two.

/// How a raw field is coerced before it reaches the encoder or the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
    Category,
}

impl FieldKind {
    pub fn expected(self) -> &'static str {
        match self {
            FieldKind::Integer => "an integer",
            FieldKind::Float => "a number",
            FieldKind::Category => "a string",
        }
    }
}

/// One field of the incoming record, keyed by its external name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputField {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> InputField {
    InputField { name, kind }
}

/// Every field a prediction request must carry, in declaration order.
pub const INPUT_FIELDS: [InputField; 11] = [
    field("person_age", FieldKind::Integer),
    field("person_income", FieldKind::Integer),
    field("person_home_ownership", FieldKind::Category),
    field("person_emp_lenght", FieldKind::Float),
    field("loan_intent", FieldKind::Category),
    field("loan_grade", FieldKind::Category),
    field("loan_amnt", FieldKind::Integer),
    field("loan_int_rate", FieldKind::Float),
    field("loan_percent_income", FieldKind::Float),
    field("cb_person_default_on_file", FieldKind::Category),
    field("cb_person_cred_hist_length", FieldKind::Integer),
];

/// External field name -> column name used when the model was trained.
pub const RENAMES: [(&str, &str); 3] = [
    ("person_home_ownership", "home_ownership"),
    ("cb_person_default_on_file", "default_onfile"),
    ("person_emp_lenght", "person_emp_length"),
];

/// Numeric training columns, in the order the model consumes them.
pub const NUMERIC_COLUMNS: [&str; 7] = [
    "person_age",
    "person_income",
    "person_emp_length",
    "loan_amnt",
    "loan_int_rate",
    "loan_percent_income",
    "cb_person_cred_hist_length",
];

/// Categorical training columns; their one-hot blocks follow the numeric
/// columns in exactly this order.
pub const CATEGORICAL_COLUMNS: [&str; 4] =
    ["home_ownership", "loan_intent", "loan_grade", "default_onfile"];

/// Translate an external field name to its training column name.
/// Names without a rename entry are already training names.
pub fn training_name(external: &str) -> &str {
    RENAMES
        .iter()
        .find(|(from, _)| *from == external)
        .map(|(_, to)| *to)
        .unwrap_or(external)
}

/// Inverse of [`training_name`], used when reporting errors to callers.
pub fn external_name(training: &str) -> &str {
    RENAMES
        .iter()
        .find(|(_, to)| *to == training)
        .map(|(from, _)| *from)
        .unwrap_or(training)
}

pub fn input_field(external: &str) -> Option<&'static InputField> {
    INPUT_FIELDS.iter().find(|f| f.name == external)
}

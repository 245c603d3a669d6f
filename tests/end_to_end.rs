// End-to-end runs of the prediction pipeline against the training layout.
use credrisk_core::{predict_json, ClassLabel, ErrorKind, PredictError};
use credrisk_encode::{EncodingError, RawRecord, SchemaError};
use credrisk_tests::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn sample_record_below_threshold_is_negative() {
    let ctx = context_with(FixedScorer(0.39), 0.4);
    let result = predict_json(&ctx, sample_record()).unwrap();
    assert_eq!(result.predicted_class, ClassLabel::Negative);
    assert_eq!(
        serde_json::to_value(result).unwrap(),
        json!({"probability": 0.39, "threshold": 0.4, "predicted_class": 0})
    );
}

#[test]
fn sample_record_above_threshold_is_positive() {
    let ctx = context_with(FixedScorer(0.41), 0.4);
    let result = predict_json(&ctx, sample_record()).unwrap();
    assert_eq!(result.predicted_class, ClassLabel::Positive);
    assert_eq!(serde_json::to_value(result).unwrap()["predicted_class"], 1);
}

#[test]
fn probability_at_threshold_is_positive() {
    let ctx = context_with(FixedScorer(0.4), 0.4);
    let result = predict_json(&ctx, sample_record()).unwrap();
    assert_eq!(result.predicted_class, ClassLabel::Positive);
}

#[test]
fn class_uses_unrounded_probability() {
    // 0.39996 rounds to 0.4 on the wire but stays below the cutoff.
    let ctx = context_with(FixedScorer(0.39996), 0.4);
    let result = predict_json(&ctx, sample_record()).unwrap();
    assert_eq!(result.predicted_class, ClassLabel::Negative);
    assert_eq!(serde_json::to_value(result).unwrap()["probability"], 0.4);
}

#[test]
fn configured_threshold_is_reported() {
    let ctx = context_with(FixedScorer(0.3), 0.25);
    let v = serde_json::to_value(predict_json(&ctx, sample_record()).unwrap()).unwrap();
    assert_eq!(v["threshold"], 0.25);
    assert_eq!(v["predicted_class"], 1);
}

#[test]
fn one_hot_columns_reach_the_scorer() {
    let columns = training_columns();
    let rent = columns
        .iter()
        .position(|c| c == "home_ownership_RENT")
        .unwrap();
    let mut weights = vec![0.0; columns.len()];
    weights[rent] = 10.0;
    let ctx = context_with(logistic(weights, -5.0), 0.4);

    let renter = predict_json(&ctx, sample_record()).unwrap();
    assert_eq!(renter.predicted_class, ClassLabel::Positive);

    let mut owner = sample_record();
    owner["person_home_ownership"] = json!("OWN");
    let owner = predict_json(&ctx, owner).unwrap();
    assert_eq!(owner.predicted_class, ClassLabel::Negative);
    assert!(owner.probability < 0.01);
}

#[test]
fn renamed_numeric_field_reaches_the_scorer() {
    let columns = training_columns();
    let emp = columns
        .iter()
        .position(|c| c == "person_emp_length")
        .unwrap();
    let mut weights = vec![0.0; columns.len()];
    weights[emp] = 1.0;
    let ctx = context_with(logistic(weights, -10.0), 0.5);

    let mut short = sample_record();
    short["person_emp_lenght"] = json!(2.0);
    assert_eq!(
        predict_json(&ctx, short).unwrap().predicted_class,
        ClassLabel::Negative
    );
    // The sample's 123 years of employment saturates the sigmoid.
    assert_eq!(
        predict_json(&ctx, sample_record()).unwrap().predicted_class,
        ClassLabel::Positive
    );
}

#[test]
fn unknown_category_is_an_encoding_error() {
    let ctx = context_with(FixedScorer(0.5), 0.4);
    let mut record = sample_record();
    record["person_home_ownership"] = json!("SPACESHIP");
    let err = predict_json(&ctx, record).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encoding);
    match err {
        PredictError::Encoding(EncodingError::UnknownCategory { feature, value, .. }) => {
            assert_eq!(feature, "home_ownership");
            assert_eq!(value, "SPACESHIP");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_field_is_a_schema_error() {
    let ctx = context_with(FixedScorer(0.5), 0.4);
    let mut record = sample_record();
    record.as_object_mut().unwrap().remove("loan_grade");
    let err = predict_json(&ctx, record).unwrap_err();
    assert!(matches!(err, PredictError::Schema(SchemaError::MissingField(ref f)) if f == "loan_grade"));
    assert!(err.is_bad_input());
}

#[test]
fn wrong_type_is_a_schema_error() {
    let ctx = context_with(FixedScorer(0.5), 0.4);
    let mut record = sample_record();
    record["loan_grade"] = json!(4);
    let err = predict_json(&ctx, record).unwrap_err();
    assert!(matches!(
        err,
        PredictError::Schema(SchemaError::TypeMismatch { .. })
    ));
}

#[test]
fn scorer_failure_is_not_bad_input() {
    let ctx = context_with(FailingScorer::default(), 0.4);
    let err = predict_json(&ctx, sample_record()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Scorer);
    assert!(!err.is_bad_input());
}

#[test]
fn field_arrival_order_does_not_matter() {
    let ctx = context_with(logistic(vec![0.01; 26], -1.0), 0.4);
    let forward = RawRecord::from_json(sample_record()).unwrap();

    let mut reversed = serde_json::Map::new();
    for (k, v) in sample_record().as_object().unwrap().iter().rev() {
        reversed.insert(k.clone(), v.clone());
    }
    let keys = |r: &RawRecord| r.fields().keys().cloned().collect::<Vec<_>>();
    let reversed = RawRecord::new(reversed);
    assert_ne!(keys(&forward), keys(&reversed));

    assert_eq!(
        ctx.assembler().assemble(&forward).unwrap().as_slice(),
        ctx.assembler().assemble(&reversed).unwrap().as_slice()
    );
    assert_eq!(ctx.predict(&forward).unwrap(), ctx.predict(&reversed).unwrap());
}

#[test]
fn repeated_requests_are_deterministic() {
    let ctx = context_with(logistic(vec![0.001; 26], -0.5), 0.4);
    let first = predict_json(&ctx, sample_record()).unwrap();
    for _ in 0..10 {
        assert_eq!(predict_json(&ctx, sample_record()).unwrap(), first);
    }
}

#[test]
fn extra_fields_are_ignored() {
    let ctx = context_with(FixedScorer(0.2), 0.4);
    let mut record = sample_record();
    record["applicant_nickname"] = json!("bob");
    assert!(predict_json(&ctx, record).is_ok());

    let mut record = sample_record();
    record.as_object_mut().unwrap().remove("loan_status");
    assert!(predict_json(&ctx, record).is_ok());
}

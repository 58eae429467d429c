use crate::{CmpResult, Entity, EntityValue, Operation, ValueError, entity_cmp};

#[test]
fn equals_is_the_default_operation() {
    assert_eq!(Operation::default(), Operation::Equals);
}

#[test]
fn operation_text_round_trips() {
    for text in [
        "equals",
        "not equal",
        "case insensitive equals",
        "case insensitive not equal",
        "greater than",
        "less than",
        "greater than or equal",
        "less than or equal",
        "pattern match",
    ] {
        let op = Operation::from_text(text).expect("known operation");
        assert_eq!(op.as_text(), text);
    }
    assert!(Operation::from_text("bitwise and").is_none());
}

#[test]
fn string_value_distinguishes_absent_from_malformed() {
    let nil = Entity::nil("path");
    assert!(matches!(nil.string_value(), Err(ValueError::Absent { .. })));

    let wrong = Entity::new("depth", EntityValue::Int(3), Operation::Equals);
    assert!(matches!(
        wrong.string_value(),
        Err(ValueError::Malformed { .. })
    ));

    let text = Entity::text("path", "/tmp", Operation::Equals);
    assert_eq!(text.string_value().expect("text"), "/tmp");
}

#[test]
fn equals_and_not_equal_compare_exactly() {
    let entity = Entity::text("path", "/tmp/x", Operation::Equals);
    assert_eq!(entity_cmp(&entity, "/tmp/x"), CmpResult::True);
    assert_eq!(entity_cmp(&entity, "/tmp/X"), CmpResult::False);

    let entity = Entity::text("path", "/tmp/x", Operation::NotEqual);
    assert_eq!(entity_cmp(&entity, "/tmp/y"), CmpResult::True);
    assert_eq!(entity_cmp(&entity, "/tmp/x"), CmpResult::False);
}

#[test]
fn case_insensitive_operations_fold_before_comparing() {
    let entity = Entity::text("filename", "README", Operation::CaseInsensitiveEquals);
    assert_eq!(entity_cmp(&entity, "readme"), CmpResult::True);
    assert_eq!(entity_cmp(&entity, "readme.md"), CmpResult::False);
}

#[test]
fn relational_operations_prefer_numeric_ordering() {
    let entity = Entity::text("version", "9", Operation::GreaterThan);
    assert_eq!(entity_cmp(&entity, "10"), CmpResult::True);
    // Lexicographically "10" < "9"; numeric parsing must win.
    let entity = Entity::text("version", "9", Operation::LessThan);
    assert_eq!(entity_cmp(&entity, "10"), CmpResult::False);

    let entity = Entity::text("name", "beta", Operation::GreaterThanOrEqual);
    assert_eq!(entity_cmp(&entity, "beta"), CmpResult::True);
    assert_eq!(entity_cmp(&entity, "alpha"), CmpResult::False);
}

#[test]
fn pattern_match_compiles_the_entity_value() {
    let entity = Entity::text("path", "^/tmp/.*", Operation::PatternMatch);
    assert_eq!(entity_cmp(&entity, "/tmp/anything"), CmpResult::True);
    assert_eq!(entity_cmp(&entity, "/var/log"), CmpResult::False);
}

#[test]
fn failed_comparisons_report_error_not_false() {
    let nil = Entity::nil("path");
    assert_eq!(entity_cmp(&nil, "/tmp"), CmpResult::Error);

    let bad_pattern = Entity::text("path", "^/tmp/(", Operation::PatternMatch);
    assert_eq!(entity_cmp(&bad_pattern, "/tmp/x"), CmpResult::Error);
}

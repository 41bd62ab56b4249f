use super::*;

#[test]
fn test_parse_checkm_mapping() {
    let src = "{'marker lineage': 'k__Bacteria', '# genomes': 5449, '5+': 0, 'GC': 0.54, 'Completeness': 100.0}";
    let Literal::Map(entries) = parse_literal(src).unwrap() else {
        panic!("expected a mapping");
    };
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0].0, Literal::Str("marker lineage".to_string()));
    assert_eq!(entries[0].1, Literal::Str("k__Bacteria".to_string()));
    assert_eq!(entries[1].1, Literal::Int(5449));
    assert_eq!(entries[2].0.as_key().as_deref(), Some("5+"));
    assert_eq!(entries[3].1, Literal::Float(0.54));
    assert_eq!(entries[4].1, Literal::Float(100.0));
}

#[test]
fn test_parse_mixed_literals() {
    let src = r#"{"a": [1, -2.5e3, (3,)], 'b': None, 'c': True, 'd': {}, 7: 'x'}"#;
    let value = parse_literal(src).unwrap();
    let Literal::Map(entries) = &value else {
        panic!("expected a mapping");
    };
    assert_eq!(
        entries[0].1,
        Literal::List(vec![
            Literal::Int(1),
            Literal::Float(-2500.0),
            Literal::List(vec![Literal::Int(3)]),
        ])
    );
    assert_eq!(entries[1].1, Literal::None);
    assert_eq!(entries[2].1, Literal::Bool(true));
    assert_eq!(entries[3].1, Literal::Map(vec![]));
    assert_eq!(entries[4].0.as_key().as_deref(), Some("7"));
}

#[test]
fn test_trailing_whitespace_allowed() {
    assert_eq!(parse_literal("{'a': 1}\n").unwrap().to_repr(), "{'a': 1}");
}

#[test]
fn test_escaped_quote_kept() {
    let value = parse_literal(r"'it\'s'").unwrap();
    assert_eq!(value, Literal::Str("it's".to_string()));
}

#[test]
fn test_bare_apostrophe_is_rejected() {
    let err = parse_literal("{'lineage': 'd'Herelle', 'GC': 0.5}").unwrap_err();
    assert!(matches!(err, LiteralError::Unexpected { .. }));
}

#[test]
fn test_trailing_content_rejected() {
    assert_eq!(parse_literal("{} x"), Err(LiteralError::Trailing(3)));
}

#[test]
fn test_unterminated_input() {
    assert!(matches!(
        parse_literal("{'a': 1"),
        Err(LiteralError::Eof(_))
    ));
    assert!(matches!(parse_literal("'abc"), Err(LiteralError::Eof(_))));
    assert!(matches!(parse_literal(""), Err(LiteralError::Eof(0))));
}

#[test]
fn test_unknown_name_rejected() {
    assert_eq!(
        parse_literal("{'a': nope}"),
        Err(LiteralError::Name("nope".to_string()))
    );
}

#[test]
fn test_special_floats() {
    assert_eq!(parse_literal("-inf").unwrap(), Literal::Float(f64::NEG_INFINITY));
    match parse_literal("nan").unwrap() {
        Literal::Float(v) => assert!(v.is_nan()),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_repr_of_nested_values() {
    let value = Literal::List(vec![
        Literal::Str("PF00001".to_string()),
        Literal::Int(2),
        Literal::Float(1.0),
        Literal::Bool(false),
    ]);
    assert_eq!(value.to_repr(), "['PF00001', 2, 1.0, False]");
}

#[test]
fn test_nesting_limit() {
    let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
    assert!(parse_literal(&ok).is_ok());

    let too_deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
    assert_eq!(
        parse_literal(&too_deep),
        Err(LiteralError::TooDeep(MAX_DEPTH))
    );

    assert_eq!(
        parse_literal(&"[".repeat(200_000)),
        Err(LiteralError::TooDeep(MAX_DEPTH))
    );
    assert!(parse_literal(&"{'a': ".repeat(200_000)).is_err());
}

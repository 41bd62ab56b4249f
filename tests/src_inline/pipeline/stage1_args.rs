use super::*;

fn fake_format(name: &str, value: &ArgValue) -> Vec<String> {
    match value {
        ArgValue::Bool(_) => vec![format!("--{name}")],
        other => vec![format!("--{name}"), other.to_string()],
    }
}

#[test]
fn test_process_common_args_bools() {
    let params = [("arg1", ArgValue::Bool(false)), ("arg2", ArgValue::Bool(true))];
    assert_eq!(process_common_args(&params, fake_format), vec!["--arg2"]);
}

#[test]
fn test_process_common_args_absent() {
    let params = [
        ("arg1", ArgValue::Str("some-value".to_string())),
        ("arg2", ArgValue::Absent),
    ];
    assert_eq!(
        process_common_args(&params, fake_format),
        vec!["--arg1", "some-value"]
    );
}

#[test]
fn test_process_common_args_with_values() {
    let params = [
        ("arg1", ArgValue::Str("value1".to_string())),
        ("arg2", ArgValue::Str("value2".to_string())),
    ];
    assert_eq!(
        process_common_args(&params, fake_format),
        vec!["--arg1", "value1", "--arg2", "value2"]
    );
}

#[test]
fn test_process_common_args_mix() {
    let params = [
        ("arg1", ArgValue::Absent),
        ("arg2", ArgValue::Str("some-value".to_string())),
        ("arg3", ArgValue::Bool(false)),
        ("arg4", ArgValue::Bool(true)),
    ];
    assert_eq!(
        process_common_args(&params, fake_format),
        vec!["--arg2", "some-value", "--arg4"]
    );
}

#[test]
fn test_zero_int_kept_other_falsy_dropped() {
    let params = [
        ("zero", ArgValue::Int(0)),
        ("no", ArgValue::Bool(false)),
        ("empty", ArgValue::Str(String::new())),
        ("none", ArgValue::Absent),
        ("fzero", ArgValue::Float(0.0)),
    ];
    assert_eq!(
        process_common_args(&params, format_checkm_arg),
        vec!["--zero", "0"]
    );
}

#[test]
fn test_token_counts() {
    assert_eq!(format_checkm_arg("reduced_tree", &ArgValue::Bool(true)).len(), 1);
    for value in [
        ArgValue::Int(2),
        ArgValue::Float(0.5),
        ArgValue::Str("x".to_string()),
    ] {
        assert_eq!(format_checkm_arg("k", &value).len(), 2);
    }
}

#[test]
fn test_process_arg_bool() {
    assert_eq!(
        format_checkm_arg("reduced_tree", &ArgValue::Bool(true)),
        vec!["--reduced_tree"]
    );
}

#[test]
fn test_process_arg_non_bool() {
    assert_eq!(
        format_checkm_arg("threads", &ArgValue::Int(2)),
        vec!["--threads", "2"]
    );
    assert_eq!(
        format_checkm_arg("length", &ArgValue::Float(0.7)),
        vec!["--length", "0.7"]
    );
    assert_eq!(
        format_checkm_arg("aai_strain", &ArgValue::Float(1.0)),
        vec!["--aai_strain", "1.0"]
    );
}

#[test]
fn test_checkm_params_order() {
    let params = CheckmParams {
        reduced_tree: true,
        e_value: Some(1e-10),
        threads: Some(4),
        pplacer_threads: Some(0),
        ..CheckmParams::default()
    };
    assert_eq!(
        params.common_args(),
        vec![
            "--reduced_tree",
            "--e_value",
            "1e-10",
            "--threads",
            "4",
            "--pplacer_threads",
            "0",
        ]
    );
    assert!(CheckmParams::default().common_args().is_empty());
    assert_eq!(CheckmParams::default().to_arg_list().len(), 14);
}

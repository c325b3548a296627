//! Integration tests for the refine pipeline
//!
//! These tests drive the public façade end-to-end, the way the UI and the
//! command line do.

use url_refiner::config::{load_config, RawConfig, RawParamList, RawValue, RewriteConfig, RewriteMode};
use url_refiner::output::Stats;
use url_refiner::{handle_json, process, refine, Response};

/// Creates a wire configuration with the given mode and value
fn create_test_config(mode: &str, value: &str) -> RawConfig {
    RawConfig {
        mode: Some(mode.to_string()),
        value: Some(RawValue::Text(value.to_string())),
        ..RawConfig::default()
    }
}

fn expect_success(response: Response) -> (Vec<String>, Stats) {
    match response {
        Response::Success { data, stats } => (data, stats),
        Response::Error { message } => panic!("expected success, got error: {}", message),
    }
}

/// Returns true if `sub` appears in `full` in the same relative order
fn is_subsequence(sub: &[String], full: &[&str]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|s| rest.any(|f| f == s))
}

const MIXED_URLS: &[&str] = &[
    "https://example.com/page?user=admin&session=123",
    "http://test.com?id=abc&user=guest",
    "https://example.com/page?user=admin&session=123",
    "http://test.com/other_path?id=abc&user=guest",
    "invalid-url",
    "https://example.com/page/?session=123&user=admin#top",
    "http://test.com/other_path/?user=guest&id=abc",
];

#[test]
fn test_exact_mode_param_order() {
    let (data, stats) = expect_success(process(
        &["http://a.com/x?b=2&a=1", "http://a.com/x?a=1&b=2"],
        &create_test_config("exact", "7"),
    ));

    assert_eq!(data, vec!["http://a.com/x?b=2&a=1"]);
    assert_eq!(stats.duplicates_removed, 1);
    assert_eq!(stats.total_output, 1);
}

#[test]
fn test_param_exclusion() {
    let mut config = create_test_config("exact", "1");
    config.exclude_params = Some(RawParamList::List(vec!["id".to_string()]));

    let (data, stats) = expect_success(process(
        &["http://a.com/x?id=1", "http://a.com/x?id=2"],
        &config,
    ));

    assert_eq!(data.len(), 1);
    assert_eq!(stats.duplicates_removed, 1);
}

#[test]
fn test_ignore_path() {
    let mut config = create_test_config("exact", "1");
    config.ignore_path = true;

    let (data, stats) = expect_success(process(&["http://a.com/a", "http://a.com/b"], &config));

    assert_eq!(data, vec!["http://a.com/a"]);
    assert_eq!(stats.duplicates_removed, 1);
}

#[test]
fn test_fuzzy_cap() {
    let (data, stats) = expect_success(process(
        &[
            "http://a.com/item/1",
            "http://a.com/item/2",
            "http://a.com/item/3",
        ],
        &create_test_config("fuzzy", "2"),
    ));

    assert_eq!(data, vec!["http://a.com/item/1", "http://a.com/item/2"]);
    assert_eq!(stats.duplicates_removed, 1);
}

#[test]
fn test_fuzzy_hex_query_values() {
    let (data, _) = expect_success(process(
        &[
            "http://a.com/view?id=9f2a6c1e0b",
            "http://a.com/view?id=7b31d4e8aa",
            "http://a.com/view?id=42",
        ],
        &create_test_config("fuzzy", "1"),
    ));

    assert_eq!(
        data,
        vec!["http://a.com/view?id=9f2a6c1e0b", "http://a.com/view?id=42"]
    );
}

#[test]
fn test_malformed_url_tolerance() {
    let (data, stats) = expect_success(process(MIXED_URLS, &create_test_config("exact", "1")));

    assert_eq!(
        data,
        vec![
            "https://example.com/page?user=admin&session=123",
            "http://test.com?id=abc&user=guest",
            "http://test.com/other_path?id=abc&user=guest",
        ]
    );
    assert_eq!(stats.total_input, 7);
    assert_eq!(stats.invalid_urls, 1);
    assert_eq!(stats.duplicates_removed, 3);
    assert_eq!(stats.total_output, 3);
    assert!(stats.is_consistent());
}

#[test]
fn test_invalid_utf8_query_counted_as_invalid() {
    let (data, stats) = expect_success(process(
        &["http://a.com/?q=%ff", "http://a.com/?q=%fe", "http://a.com/?q=ok"],
        &create_test_config("exact", "1"),
    ));

    assert_eq!(data, vec!["http://a.com/?q=ok"]);
    assert_eq!(stats.invalid_urls, 2);
    assert_eq!(stats.duplicates_removed, 0);
    assert_eq!(stats.total_output, 1);
    assert!(stats.is_consistent());
}

#[test]
fn test_fragment_escapes_tolerated() {
    let (data, stats) = expect_success(process(
        &["http://a.com/x#100%", "http://a.com/x#other"],
        &create_test_config("exact", "1"),
    ));

    assert_eq!(data, vec!["http://a.com/x#100%"]);
    assert_eq!(stats.invalid_urls, 0);
    assert_eq!(stats.duplicates_removed, 1);
}

#[test]
fn test_other_scheme_exclusion_and_fragment() {
    let mut config = create_test_config("exact", "1");
    config.exclude_params = Some(RawParamList::List(vec!["sid".to_string()]));

    let (data, stats) = expect_success(process(
        &[
            "ftp://files.example.com/pub?sid=1&f=a",
            "ftp://files.example.com/pub?f=a&sid=2#top",
            "FTP://files.example.com/pub?f=a",
        ],
        &config,
    ));

    assert_eq!(
        data,
        vec!["ftp://files.example.com/pub?sid=1&f=a", "FTP://files.example.com/pub?f=a"]
    );
    assert_eq!(stats.duplicates_removed, 1);
}

#[test]
fn test_counter_invariant_without_parse_failures() {
    let urls = [
        "http://a.com/1",
        "http://a.com/2",
        "http://a.com/1",
        "http://b.com/x?q=1",
        "http://b.com/x?q=1#f",
    ];
    let (_, stats) = expect_success(process(&urls, &create_test_config("exact", "1")));

    assert_eq!(stats.invalid_urls, 0);
    assert_eq!(stats.total_input, stats.duplicates_removed + stats.total_output);
}

#[test]
fn test_order_preservation() {
    let (data, _) = expect_success(process(MIXED_URLS, &create_test_config("fuzzy", "1")));
    assert!(is_subsequence(&data, MIXED_URLS));
}

#[test]
fn test_idempotence() {
    let mut config = create_test_config("fuzzy", "2");
    config.exclude_params = Some(RawParamList::Csv("session".to_string()));

    let first = process(MIXED_URLS, &config);
    let second = process(MIXED_URLS, &config);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_empty_input() {
    let urls: Vec<String> = Vec::new();
    match process(&urls, &create_test_config("exact", "1")) {
        Response::Error { message } => assert!(!message.is_empty()),
        Response::Success { .. } => panic!("empty input must not succeed"),
    }
}

#[test]
fn test_invalid_configuration() {
    for (mode, value) in [("sideways", "1"), ("fuzzy", "0"), ("fuzzy", "two"), ("exact", "-1")] {
        let response = process(&["http://a.com/"], &create_test_config(mode, value));
        assert!(
            !response.is_success(),
            "mode={} value={} should be rejected",
            mode,
            value
        );
    }
}

#[test]
fn test_rewrite_replace() {
    let mut config = create_test_config("exact", "1");
    config.rewrite = Some(RewriteConfig {
        mode: RewriteMode::Replace,
        value: "FUZZ".to_string(),
    });
    config.exclude_params = Some(RawParamList::List(vec!["session".to_string()]));

    let (data, _) = expect_success(process(MIXED_URLS, &config));

    assert_eq!(
        data,
        vec![
            "https://example.com/page?user=FUZZ&session=123",
            "http://test.com/?id=FUZZ&user=FUZZ",
            "http://test.com/other_path?id=FUZZ&user=FUZZ",
        ]
    );
}

#[test]
fn test_json_boundary() {
    let request = r#"{
        "urls": ["http://a.com/x?b=2&a=1", "http://a.com/x?a=1&b=2", "nonsense"],
        "config": {"mode": "exact", "value": "1", "exclude_params": [], "ignore_path": false}
    }"#;

    let response: serde_json::Value = serde_json::from_str(&handle_json(request)).unwrap();
    assert_eq!(response["status"], "success");
    assert_eq!(response["data"].as_array().unwrap().len(), 1);
    assert_eq!(response["stats"]["total_input"], 3);
    assert_eq!(response["stats"]["duplicates_removed"], 1);
    assert_eq!(response["stats"]["total_output"], 1);
    assert_eq!(response["stats"]["invalid_urls"], 1);
}

#[test]
fn test_json_boundary_errors() {
    let response: serde_json::Value =
        serde_json::from_str(&handle_json(r#"{"urls": [], "config": {"mode": "exact"}}"#)).unwrap();
    assert_eq!(response["status"], "error");
    assert_eq!(response["message"], "no URLs supplied");

    let response: serde_json::Value =
        serde_json::from_str(&handle_json(r#"{"urls": ["http://a.com/"], "config": {"mode": "exact", "value": "x"}}"#))
            .unwrap();
    assert_eq!(response["status"], "error");

    let response: serde_json::Value = serde_json::from_str(&handle_json("[1, 2")).unwrap();
    assert_eq!(response["status"], "error");
}

#[test]
fn test_file_config_with_refine() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"mode = \"fuzzy\"\nvalue = 1\nignore-path = true\n")
        .unwrap();
    file.flush().unwrap();

    let config = load_config(file.path()).unwrap();
    let (data, stats) = refine(
        &["http://a.com/a/1?x=1", "http://a.com/b?x=2", "http://b.com/a?x=1"],
        &config,
    )
    .unwrap();

    assert_eq!(data, vec!["http://a.com/a/1?x=1", "http://b.com/a?x=1"]);
    assert_eq!(stats.duplicates_removed, 1);
}

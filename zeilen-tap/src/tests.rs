use assert_matches::assert_matches;
use serde_json::json;
use zeilen::{LineSource, SourceError};

use crate::{
    parse_lines, parse_read, parse_source, Config, Directive, Document, InnerParseError, Plan,
    TestEntry, TestTitle, YamlBlock,
};

fn two_passing_tests() -> Vec<&'static str> {
    vec![
        "TAP version 13",
        "1..2",
        "# Subtest: /Path/to/project/dist/some-test.test.js",
        "ok 1 - /Path/to/project/dist/some-test.test.js",
        "  ---",
        "  duration_ms: 61.432875",
        "  ...",
        "# Subtest: /Path/to/project/dist/a-second-test.test.js",
        "ok 2 - /Path/to/project/dist/a-second-test.test.js",
        "  ---",
        "  duration_ms: 63.843833",
        "  ...",
        "# tests 2",
        "# pass 2",
        "# fail 0",
        "# cancelled 0",
        "# skipped 0",
        "# todo 0",
        "# duration_ms 125.795667",
    ]
}

fn passed(number: u64, description: &str, yaml: &[&str]) -> TestEntry {
    TestEntry {
        title: TestTitle {
            ok: true,
            test_number: Some(number),
            description: Some(description.to_owned()),
            directive: None,
        },
        yaml: YamlBlock {
            lines: yaml.iter().map(|&line| line.to_owned()).collect(),
        },
    }
}

#[test]
fn plan_only() -> Result<(), crate::ParseError> {
    let document = parse_lines(["TAP version 13", "1..4"], &Config::default())?;

    assert_eq!(
        document,
        Document {
            version: 13,
            test_plan: Some(Plan {
                start: 1,
                through: 4
            }),
            diagnostics: vec![],
            tests: vec![],
        }
    );
    Ok(())
}

#[test]
fn unsupported_version() {
    let source = LineSource::from_lines(["TAP version 12"]);
    let failure = parse_source(&source, &Config::default()).unwrap_err();

    assert_eq!(failure.context.position().line, 1);
    assert_eq!(
        failure.message,
        "Unexpected TAP version: Expected 13, received 12"
    );

    let error = parse_lines(["TAP version 12"], &Config::default()).unwrap_err();
    assert_eq!(
        error.to_string(),
        "2:1: Unexpected TAP version: Expected 13, received 12"
    );
}

#[test]
fn missing_version() {
    let error = parse_lines(["1..4"], &Config::default()).unwrap_err();
    assert_matches!(*error, InnerParseError::SyntaxError(error) => {
        assert_eq!(error.location.line, 1);
        assert_eq!(error.msg, "Not a TAP version");
    });

    let error = parse_lines(Vec::<String>::new(), &Config::default()).unwrap_err();
    assert_eq!(error.to_string(), "1:1: Not a TAP version");
}

#[test]
fn two_tests_with_diagnostics() -> Result<(), crate::ParseError> {
    let document = parse_lines(two_passing_tests(), &Config::default())?;

    assert_eq!(document.version, 13);
    assert_eq!(
        document.test_plan,
        Some(Plan {
            start: 1,
            through: 2
        })
    );
    assert_eq!(
        document.diagnostics,
        [
            "Subtest: /Path/to/project/dist/some-test.test.js",
            "Subtest: /Path/to/project/dist/a-second-test.test.js",
            "tests 2",
            "pass 2",
            "fail 0",
            "cancelled 0",
            "skipped 0",
            "todo 0",
            "duration_ms 125.795667",
        ]
    );
    assert_eq!(
        document.tests,
        [
            passed(
                1,
                "- /Path/to/project/dist/some-test.test.js",
                &["duration_ms: 61.432875"]
            ),
            passed(
                2,
                "- /Path/to/project/dist/a-second-test.test.js",
                &["duration_ms: 63.843833"]
            ),
        ]
    );
    Ok(())
}

#[test]
fn stream_input() -> Result<(), crate::ParseError> {
    let text = two_passing_tests().join("\r\n");
    let from_stream = parse_read(text.as_bytes(), &Config::default())?;
    let from_lines = parse_lines(two_passing_tests(), &Config::default())?;

    assert_eq!(from_stream, from_lines);
    Ok(())
}

#[test]
fn yaml_indentation_beyond_the_block_is_kept() -> Result<(), crate::ParseError> {
    let document = parse_lines(
        [
            "TAP version 13",
            "not ok 1 - compares",
            "  ---",
            "  expected:",
            "    - 1",
            "    - 2",
            "  actual: |",
            "      indented text",
            "  ...",
        ],
        &Config::default(),
    )?;

    assert_eq!(
        document.tests[0].yaml.lines,
        [
            "expected:",
            "  - 1",
            "  - 2",
            "actual: |",
            "    indented text"
        ]
    );
    Ok(())
}

#[test]
fn unterminated_yaml_block_stops_parsing() -> Result<(), crate::ParseError> {
    let lines = [
        "TAP version 13",
        "# before",
        "ok 1",
        "  ---",
        "  a: 1",
        "  b: 2",
        "  c: 3",
        "  ...",
        "# after",
    ];

    let document = parse_lines(lines, &Config::default().yaml_line_limit(2))?;
    assert_eq!(document.diagnostics, ["before"]);
    assert!(document.tests.is_empty());

    let document = parse_lines(lines, &Config::default())?;
    assert_eq!(document.diagnostics, ["before", "after"]);
    assert_eq!(document.tests.len(), 1);
    Ok(())
}

#[test]
fn unterminated_yaml_block_names_the_limit() {
    use zeilen::{Parsed, Parser};

    let source = LineSource::from_lines(["ok 1", "  ---", "  a: 1", "  b: 2", "  ..."]);
    let config = Config::default().yaml_line_limit(2);

    assert_matches!(
        crate::grammar::test_entry(&config).parse(&source.context()),
        Parsed::Failure(failure) => {
            assert_eq!(failure.context.position().line, 1);
            assert_eq!(
                failure.message,
                "Didn't encounter a YAML line delimiter before configured limit of 2 lines."
            );
        }
    );
}

#[test]
fn line_limit() -> Result<(), crate::ParseError> {
    let lines = ["TAP version 13", "# one", "# two", "# three"];

    let document = parse_lines(lines, &Config::default().line_limit(2))?;
    assert_eq!(document.diagnostics, ["one", "two"]);
    Ok(())
}

#[test]
fn last_plan_wins() -> Result<(), crate::ParseError> {
    let document = parse_lines(["TAP version 13", "1..4", "# x", "0..3"], &Config::default())?;
    assert_eq!(
        document.test_plan,
        Some(Plan {
            start: 0,
            through: 3
        })
    );
    Ok(())
}

#[test]
fn title_with_directive() -> Result<(), crate::ParseError> {
    let document = parse_lines(
        [
            "TAP version 13",
            "ok 42 this is the description of the test # todo",
            "  ---",
            "  ...",
        ],
        &Config::default(),
    )?;

    assert_eq!(
        document.tests[0].title,
        TestTitle {
            ok: true,
            test_number: Some(42),
            description: Some("this is the description of the test".to_owned()),
            directive: Some(Directive::Todo),
        }
    );
    Ok(())
}

#[test]
fn uppercase_directives_are_comments() -> Result<(), crate::ParseError> {
    let document = parse_lines(
        [
            "TAP version 13",
            "ok 1 - widget # SKIP no widgets",
            "  ---",
            "  ...",
            "ok 2 - gadget # TODO",
            "  ---",
            "  ...",
            "# tests 2",
        ],
        &Config::default(),
    )?;

    assert_eq!(document.tests.len(), 2);
    assert_eq!(document.tests[0].title.description.as_deref(), Some("- widget"));
    assert_eq!(document.tests[0].title.directive, None);
    assert_eq!(document.tests[1].title.directive, None);
    assert_eq!(document.diagnostics, ["tests 2"]);
    Ok(())
}

#[test]
fn non_text_input_is_fatal() {
    let input: &[u8] = b"TAP version 13\n# caf\xe9\n";
    let error = parse_read(input, &Config::default()).unwrap_err();

    assert_matches!(
        *error,
        InnerParseError::SourceError(SourceError::NotText { line: 2, .. })
    );
}

#[test]
fn serialized_shape() -> Result<(), Box<dyn std::error::Error>> {
    let document = parse_lines(
        [
            "TAP version 13",
            "1..2",
            "# Subtest: widgets",
            "ok 1 - counts",
            "  ---",
            "  duration_ms: 1.5",
            "  ...",
            "not ok 2 # skip",
            "  ---",
            "  ...",
        ],
        &Config::default(),
    )?;

    assert_eq!(
        serde_json::to_value(&document)?,
        json!({
            "version": 13,
            "testPlan": { "start": 1, "through": 2 },
            "diagnostics": ["Subtest: widgets"],
            "tests": [
                {
                    "type": "tapTest",
                    "title": {
                        "type": "tapTestTitle",
                        "ok": true,
                        "testNumber": 1,
                        "description": "- counts",
                    },
                    "yamlDocContents": {
                        "type": "yamlDocLines",
                        "yamlDocLines": ["duration_ms: 1.5"],
                    },
                },
                {
                    "type": "tapTest",
                    "title": {
                        "type": "tapTestTitle",
                        "ok": false,
                        "testNumber": 2,
                        "diagnostic": "skip",
                    },
                    "yamlDocContents": {
                        "type": "yamlDocLines",
                        "yamlDocLines": [],
                    },
                },
            ],
        })
    );

    let empty = serde_json::to_value(Document::default())?;
    assert_eq!(
        empty,
        json!({ "version": 13, "diagnostics": [], "tests": [] })
    );
    Ok(())
}

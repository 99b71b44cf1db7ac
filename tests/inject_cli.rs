//! End-to-end runs of `swire inject` against scratch projects.

mod common;

use common::Project;

#[test]
fn creates_config_from_environment() {
    let project = Project::new();
    project.write(
        "mapping.json",
        r#"{"structured": {"config.json": {"api.key": "env:API_KEY"}}}"#,
    );

    let result = project.swire(
        &["inject", "--mapping", "mapping.json"],
        &[("API_KEY", "secret123xyz")],
    );

    assert_eq!(result.code, Some(0), "stderr: {}", result.stderr);
    assert_eq!(
        project.read("config.json"),
        "{\n  \"api\": {\n    \"key\": \"secret123xyz\"\n  }\n}\n"
    );
    assert!(result.stdout.contains("wrote config.json"));
}

#[test]
fn strict_mode_reports_missing_token_after_writing() {
    let project = Project::new();
    project.write("db.conf", "user=app\npassword=${DB_PASS}\n");
    project.write("mapping.json", r#"{"tokens": {"db.conf": ["DB_PASS"]}}"#);

    let result = project.swire(&["inject", "--mapping", "mapping.json", "--require-all"], &[]);

    assert_eq!(result.code, Some(1));
    assert_eq!(project.read("db.conf"), "user=app\npassword=\n");
    assert!(
        result.stderr.contains("Missing required env(s): DB_PASS\n"),
        "stderr: {}",
        result.stderr
    );
}

#[test]
fn strict_mode_lists_each_variable_once_sorted() {
    let project = Project::new();
    project.write("run.env", "B=${B_VAR}\nA=${A_VAR}\n");
    project.write(
        "mapping.json",
        r#"{
            "structured": {
                "one.json": {"x": "env:B_VAR"},
                "two.json": {"y": "env:B_VAR", "z": "env:A_VAR"}
            },
            "tokens": {"run.env": ["B_VAR", "A_VAR"]}
        }"#,
    );

    let result = project.swire(&["inject", "--mapping", "mapping.json", "--require-all"], &[]);

    assert_eq!(result.code, Some(1));
    assert!(result
        .stderr
        .contains("Missing required env(s): A_VAR, B_VAR\n"));
}

#[test]
fn missing_variables_without_strict_mode_succeed() {
    let project = Project::new();
    project.write("mapping.json", r#"{"structured": {"config.json": {"api.key": "env:API_KEY"}}}"#);

    let result = project.swire(&["inject", "--mapping", "mapping.json"], &[]);

    assert_eq!(result.code, Some(0), "stderr: {}", result.stderr);
    assert_eq!(project.read("config.json"), "{\n  \"api\": {\n    \"key\": \"\"\n  }\n}\n");
    assert!(!result.stderr.contains("Missing required env(s)"));
}

#[test]
fn missing_mapping_exits_with_distinct_status() {
    let project = Project::new();

    let result = project.swire(&["inject", "--mapping", "nope.json", "--require-all"], &[]);

    assert_eq!(result.code, Some(2));
    assert!(result.stderr.contains("mapping file not found: nope.json"));
}

#[test]
fn unsupported_target_format_fails() {
    let project = Project::new();
    project.write("mapping.json", r#"{"structured": {"app.ini": {"a": "literal:x"}}}"#);

    let result = project.swire(&["inject", "--mapping", "mapping.json"], &[]);

    assert_eq!(result.code, Some(1));
    assert!(result.stderr.contains("unsupported structured format"), "stderr: {}", result.stderr);
    assert!(!project.path("app.ini").exists());
}

#[test]
fn malformed_mapping_fails() {
    let project = Project::new();
    project.write("mapping.json", "{\"structured\": [");

    let result = project.swire(&["inject", "--mapping", "mapping.json"], &[]);

    assert_eq!(result.code, Some(1));
    assert!(result.stderr.contains("parse mapping JSON"), "stderr: {}", result.stderr);
}

#[test]
fn root_flag_resolves_targets_and_templates() {
    let project = Project::new();
    project.write(
        "deploy/config.template.json",
        "{\"api\": {\"endpoint\": \"https://api.example.com\"}, \"debug\": false}\n",
    );
    project.write(
        "mapping.json",
        r#"{
            "structured": {"config.json": {"api.key": "default:API_KEY:dev-key"}},
            "templates": {"config.json": "config.template.json"}
        }"#,
    );

    let result = project.swire(
        &["inject", "--mapping", "mapping.json", "--root", "deploy"],
        &[],
    );

    assert_eq!(result.code, Some(0), "stderr: {}", result.stderr);
    assert_eq!(
        project.read("deploy/config.json"),
        "{\n  \"api\": {\n    \"endpoint\": \"https://api.example.com\",\n    \"key\": \"dev-key\"\n  },\n  \"debug\": false\n}\n"
    );
    assert!(!project.path("config.json").exists());
}

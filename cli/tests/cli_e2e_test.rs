use assert_cmd::{Command, cargo_bin_cmd};
use std::path::Path;

fn lti() -> Command {
    let mut cmd = cargo_bin_cmd!("lti");
    cmd.env_clear().env("NO_COLOR", "1");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

mod help_and_version {
    use super::*;
    use predicates::prelude::predicate;

    #[test]
    fn test_help_flag() {
        lti()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("initiation-url"));
    }

    #[test]
    fn test_version_flag() {
        lti()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("lti"));
    }

    #[test]
    fn test_no_args_shows_help() {
        lti()
            .assert()
            .failure()
            .stderr(predicate::str::contains("Usage:"));
    }
}

mod hints_subcommand {
    use super::*;
    use predicates::prelude::predicate;

    #[test]
    fn test_login_encode_plain_user() {
        lti()
            .args(["hints", "login", "encode", "--user-id", "user-1"])
            .assert()
            .success()
            .stdout("user-1||\n");
    }

    #[test]
    fn test_login_encode_anonymous_impersonation() {
        lti()
            .args([
                "hints",
                "login",
                "encode",
                "--user-id",
                "user-1",
                "--anonymous",
                "--actual-user-id",
                "admin-7",
            ])
            .assert()
            .success()
            .stdout("user-1|1|admin-7\n");
    }

    #[test]
    fn test_login_decode_json() {
        let value = stdout_json(lti().args(["hints", "login", "decode", "user-1|1|", "--json"]));

        assert_eq!(value["user_id"], "user-1");
        assert_eq!(value["is_anonymous"], true);
        assert!(value["actual_user_id"].is_null());
    }

    #[test]
    fn test_login_decode_malformed_is_empty_not_error() {
        let value = stdout_json(lti().args(["hints", "login", "decode", "onlyonefield", "--json"]));
        assert_eq!(value["user_id"], "");
        assert_eq!(value["is_anonymous"], false);

        lti()
            .args(["hints", "login", "decode", "onlyonefield"])
            .assert()
            .success()
            .stdout(predicate::str::contains("(none)"))
            .stdout(predicate::str::contains("three '|'-separated fields"));
    }

    #[test]
    fn test_message_encode_then_decode() {
        let output = lti()
            .args([
                "hints",
                "message",
                "encode",
                "--deployment-id",
                "dep-1",
                "--context-id",
                "ctx-1",
                "--resource-link-id",
                "rl-1",
            ])
            .output()
            .unwrap();
        assert!(output.status.success());
        let encoded = String::from_utf8(output.stdout).unwrap().trim_end().to_string();
        assert_eq!(encoded, "LtiResourceLinkRequest|dep-1|ctx-1|rl-1|");

        let value = stdout_json(lti().args(["hints", "message", "decode", &encoded, "--json"]));
        assert_eq!(value["message_type"], "LtiResourceLinkRequest");
        assert_eq!(value["deployment_id"], "dep-1");
        assert_eq!(value["context_id"], "ctx-1");
        assert_eq!(value["resource_link_id"], "rl-1");
        assert!(value["opaque_hint"].is_null());
        assert!(value["launch_hint"]["deep_link_settings"].is_null());
    }

    #[test]
    fn test_message_encode_rejects_unknown_type() {
        lti()
            .args([
                "hints",
                "message",
                "encode",
                "--message-type",
                "LtiSubmissionReviewRequest",
                "--deployment-id",
                "dep-1",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown message type"));
    }

    #[test]
    fn test_opaque_presentation_round_trip() {
        let output = lti()
            .args([
                "hints",
                "opaque",
                "encode",
                "--message-type",
                "LtiResourceLinkRequest",
                "--presentation",
                r#"{"documentTarget":"iframe","height":600}"#,
            ])
            .output()
            .unwrap();
        assert!(output.status.success());
        let opaque = String::from_utf8(output.stdout).unwrap().trim_end().to_string();

        let value = stdout_json(lti().args([
            "hints",
            "opaque",
            "decode",
            &opaque,
            "--message-type",
            "LtiResourceLinkRequest",
            "--json",
        ]));
        assert_eq!(value["presentation"]["documentTarget"], "iframe");
        assert_eq!(value["presentation"]["height"], 600);
    }

    #[test]
    fn test_opaque_deep_linking_round_trip() {
        let output = lti()
            .args([
                "hints",
                "opaque",
                "encode",
                "--message-type",
                "LtiDeepLinkingRequest",
                "--settings",
                r#"{"acceptMultiple":false,"data":"a|b"}"#,
            ])
            .output()
            .unwrap();
        assert!(output.status.success());
        let opaque = String::from_utf8(output.stdout).unwrap().trim_end().to_string();

        let value = stdout_json(lti().args([
            "hints",
            "opaque",
            "decode",
            &opaque,
            "--message-type",
            "LtiDeepLinkingRequest",
            "--json",
        ]));
        assert_eq!(value["deep_link_settings"]["acceptMultiple"], false);
        assert_eq!(value["deep_link_settings"]["data"], "a|b");
    }

    #[test]
    fn test_opaque_decode_garbage_is_empty() {
        let value = stdout_json(lti().args([
            "hints",
            "opaque",
            "decode",
            "%%%not-base64",
            "--message-type",
            "LtiResourceLinkRequest",
            "--json",
        ]));
        assert_eq!(value["presentation"], serde_json::json!({}));
    }

    #[test]
    fn test_opaque_encode_invalid_json() {
        lti()
            .args([
                "hints",
                "opaque",
                "encode",
                "--message-type",
                "LtiResourceLinkRequest",
                "--presentation",
                "{not json",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid JSON for --presentation"));
    }
}

mod initiation_url_subcommand {
    use super::*;
    use predicates::prelude::predicate;
    use tempfile::TempDir;

    fn write_tool(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("tool.json");
        std::fs::write(
            &path,
            r#"{
                "id": "tool-1",
                "clientId": "client-1",
                "name": "Quiz Tool",
                "launchUrl": "https://tool.example/launch",
                "deepLinkUrl": "https://tool.example/deep-link",
                "oidcInitiationUrl": "https://tool.example/login"
            }"#
        )
        .unwrap();
        path
    }

    fn write_config(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("platform.toml");
        std::fs::write(
            &path,
            "issuer = \"https://lms.university.edu\"\nbase_url = \"https://lms.university.edu\"\n"
        )
        .unwrap();
        path
    }

    #[test]
    fn test_resource_link_initiation_parameters_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let tool = write_tool(temp_dir.path());
        let config = write_config(temp_dir.path());

        let value = stdout_json(lti().args([
            "initiation-url",
            "--config",
            config.to_str().unwrap(),
            "--tool",
            tool.to_str().unwrap(),
            "--deployment-id",
            "dep-1",
            "--context-id",
            "ctx-1",
            "--resource-link-id",
            "rl-1",
            "--user-id",
            "user-1",
            "--json",
        ]));

        let url = value["url"].as_str().unwrap();
        assert!(url.starts_with("https://tool.example/login?iss="));
        let order: Vec<usize> = [
            "iss=",
            "&login_hint=",
            "&target_link_uri=",
            "&client_id=",
            "&lti_message_hint=",
            "&lti_deployment_id=",
        ]
        .iter()
        .map(|key| url.find(key).unwrap())
        .collect();
        assert!(order.windows(2).all(|pair| pair[0] < pair[1]));

        let params = &value["params"];
        assert_eq!(params["iss"], "https://lms.university.edu");
        assert_eq!(params["login_hint"], "user-1||");
        assert_eq!(params["target_link_uri"], "https://tool.example/launch");
        assert_eq!(params["client_id"], "client-1");
        assert_eq!(params["lti_message_hint"], "LtiResourceLinkRequest|dep-1|ctx-1|rl-1|");
        assert_eq!(params["lti_deployment_id"], "dep-1");
    }

    #[test]
    fn test_resource_link_url_becomes_target() {
        let temp_dir = TempDir::new().unwrap();
        let tool = write_tool(temp_dir.path());

        let value = stdout_json(lti().args([
            "initiation-url",
            "--tool",
            tool.to_str().unwrap(),
            "--deployment-id",
            "dep-1",
            "--context-id",
            "ctx-1",
            "--resource-link-id",
            "rl-1",
            "--resource-link-url",
            "https://tool.example/quiz/7",
            "--user-id",
            "user-1",
            "--json",
        ]));

        assert_eq!(value["params"]["target_link_uri"], "https://tool.example/quiz/7");
        assert_eq!(value["params"]["iss"], "https://lms.example.com");
    }

    #[test]
    fn test_deep_linking_targets_deep_link_url() {
        let temp_dir = TempDir::new().unwrap();
        let tool = write_tool(temp_dir.path());

        let value = stdout_json(lti().args([
            "initiation-url",
            "--tool",
            tool.to_str().unwrap(),
            "--message-type",
            "LtiDeepLinkingRequest",
            "--deployment-id",
            "dep-1",
            "--context-id",
            "ctx-1",
            "--user-id",
            "user-1",
            "--json",
        ]));

        assert_eq!(value["params"]["target_link_uri"], "https://tool.example/deep-link");
        let message_hint = value["params"]["lti_message_hint"].as_str().unwrap();
        assert!(message_hint.starts_with("LtiDeepLinkingRequest|dep-1|ctx-1||"));
    }

    #[test]
    fn test_issuer_flag_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let tool = write_tool(temp_dir.path());
        let config = write_config(temp_dir.path());

        let value = stdout_json(lti().args([
            "initiation-url",
            "--config",
            config.to_str().unwrap(),
            "--issuer",
            "https://override.example",
            "--tool",
            tool.to_str().unwrap(),
            "--deployment-id",
            "dep-1",
            "--context-id",
            "ctx-1",
            "--resource-link-id",
            "rl-1",
            "--user-id",
            "user-1",
            "--json",
        ]));

        assert_eq!(value["params"]["iss"], "https://override.example");
    }

    #[test]
    fn test_resource_link_launch_requires_link() {
        let temp_dir = TempDir::new().unwrap();
        let tool = write_tool(temp_dir.path());

        lti()
            .args([
                "initiation-url",
                "--tool",
                tool.to_str().unwrap(),
                "--deployment-id",
                "dep-1",
                "--user-id",
                "user-1",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--resource-link-id is required"));
    }

    #[test]
    fn test_missing_tool_file() {
        lti()
            .args([
                "initiation-url",
                "--tool",
                "/nonexistent/tool.json",
                "--deployment-id",
                "dep-1",
                "--user-id",
                "user-1",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read tool file"));
    }
}

mod config_subcommand {
    use super::*;
    use predicates::prelude::predicate;
    use tempfile::TempDir;

    #[test]
    fn test_check_defaults() {
        lti()
            .args(["config", "check"])
            .assert()
            .success()
            .stdout(predicate::str::contains("https://lms.example.com"))
            .stdout(predicate::str::contains("Configuration is valid"));
    }

    #[test]
    fn test_check_yaml_json_output() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("platform.yaml");
        std::fs::write(
            &path,
            "issuer: https://lms.university.edu\ntoken_lifetime_seconds: 600\n"
        )
        .unwrap();

        let value = stdout_json(lti().args(["config", "check", "--config", path.to_str().unwrap(), "--json"]));
        assert_eq!(value["issuer"], "https://lms.university.edu");
        assert_eq!(value["token_lifetime_seconds"], 600);
    }

    #[test]
    fn test_check_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("platform.toml");
        std::fs::write(&path, "issuer = \"https://file.example\"\n").unwrap();

        let value = stdout_json(
            lti()
                .env("LTI_ISSUER", "https://env.example")
                .args(["config", "check", "--config", path.to_str().unwrap(), "--json"])
        );
        assert_eq!(value["issuer"], "https://env.example");
    }

    #[test]
    fn test_check_rejects_invalid_lifetime() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("platform.toml");
        std::fs::write(&path, "token_lifetime_seconds = 5\n").unwrap();

        lti()
            .args(["config", "check", "--config", path.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid platform configuration"));
    }

    #[test]
    fn test_check_rejects_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("platform.ini");
        std::fs::write(&path, "issuer=x\n").unwrap();

        lti()
            .args(["config", "check", "--config", path.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to load configuration"));
    }
}

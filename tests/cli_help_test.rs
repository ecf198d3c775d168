#[cfg(test)]
mod cli_help_tests {
    use assert_cmd::prelude::*;
    use predicates::prelude::*;
    use std::process::Command;

    #[test]
    fn test_cli_help_output() {
        let mut cmd = Command::cargo_bin("restcli").unwrap();

        let assert_result = cmd.arg("--help").assert().success();
        let output = assert_result.get_output();
        let help_output = String::from_utf8_lossy(&output.stdout);

        println!("CLI Help Output:\n{}", help_output);

        assert!(help_output.contains("Usage:"));
        assert!(help_output.contains("Options:"));
        assert!(help_output.contains("Commands:"));

        assert!(help_output.contains("download-file"));
        assert!(help_output.contains("config"));

        // generic call options
        assert!(help_output.contains("--base"));
        assert!(help_output.contains("--param"));
        assert!(help_output.contains("--header"));
        assert!(help_output.contains("--timeout"));
        assert!(help_output.contains("--list"));

        assert!(help_output.contains("-h, --help"));
        assert!(help_output.contains("-V, --version"));
    }

    #[test]
    fn test_cli_subcommand_help_outputs() {
        let subcommands = vec![
            ("download-file", vec!["--full", "--output"]),
            ("config", vec!["path", "show", "init"]),
        ];

        for (subcommand, expected) in subcommands {
            let mut cmd = Command::cargo_bin("restcli").unwrap();
            let assert_result = cmd.arg(subcommand).arg("--help").assert().success();
            let output = assert_result.get_output();
            let help_output = String::from_utf8_lossy(&output.stdout);

            println!("Help Output for '{}':\n{}", subcommand, help_output);

            assert!(help_output.contains("Usage:"));
            assert!(help_output.contains(subcommand));
            for item in expected {
                assert!(help_output.contains(item), "missing {} in {}", item, subcommand);
            }
        }
    }

    #[test]
    fn test_cli_version_output() {
        let mut cmd = Command::cargo_bin("restcli").unwrap();

        cmd.arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("restcli").and(predicate::str::contains('.')));
    }

    #[test]
    fn test_download_file_requires_file_id() {
        let mut cmd = Command::cargo_bin("restcli").unwrap();

        cmd.arg("download-file")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("<file-id>"));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let mut cmd = Command::cargo_bin("restcli").unwrap();

        cmd.env_remove("RESTCLI_TIMEOUT")
            .args(["get", "--timeout", "0"])
            .assert()
            .failure()
            .code(1);
    }
}

#[cfg(test)]
mod config_tests {
    use assert_cmd::prelude::*;
    use predicates::prelude::*;
    use std::process::Command;
    use tempfile::TempDir;

    fn restcli(config_dir: &TempDir) -> Command {
        let mut cmd = Command::cargo_bin("restcli").unwrap();
        cmd.env("RESTCLI_CONFIG_DIR", config_dir.path())
            .env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn test_config_path_uses_config_dir() {
        let config_dir = TempDir::new().unwrap();
        let expected = config_dir.path().join("config.yml");

        restcli(&config_dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains(expected.display().to_string()));
    }

    #[test]
    fn test_config_init_then_show() {
        let config_dir = TempDir::new().unwrap();

        restcli(&config_dir)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration written to:"));
        assert!(config_dir.path().join("config.yml").exists());

        restcli(&config_dir)
            .args(["config", "init"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("--force"));

        restcli(&config_dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("login_endpoint: auth/login"))
            .stdout(predicate::str::contains("timeout_seconds: 30"));
    }

    #[test]
    fn test_config_show_masks_password() {
        let config_dir = TempDir::new().unwrap();
        let custom = config_dir.path().join("custom.yml");
        std::fs::write(
            &custom,
            "api:\n  base_address: http://api.test\n  login: alice\n  password: hunter2\n",
        )
        .unwrap();

        restcli(&config_dir)
            .args(["config", "show", "--config"])
            .arg(&custom)
            .assert()
            .success()
            .stdout(predicate::str::contains("http://api.test"))
            .stdout(predicate::str::contains("hunter2").not());
    }
}

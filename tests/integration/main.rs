//! Integration tests for devbuild

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
        // products available for dev runs
        {
          products: {
            A: {modules: [m1, m2], class: Foo},
            PyCharmCore: {modules: ["python.core"], class: "PyCharmProperties",},
          }
        }
    "#;

    fn devbuild() -> Command {
        let mut cmd = cargo_bin_cmd!("devbuild");
        cmd.env_remove("DEVBUILD_HOME").env_remove("DEVBUILD_CONFIG");
        cmd
    }

    fn project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        for module in ["m1", "m2", "python.core"] {
            let dir = temp.path().join("out/classes/production").join(module);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("Main.class"), module).unwrap();
        }
        fs::create_dir_all(temp.path().join("build")).unwrap();
        fs::write(temp.path().join("build/dev-build-server.json"), config).unwrap();
        temp
    }

    fn home_arg(temp: &TempDir) -> String {
        temp.path().display().to_string()
    }

    #[test]
    fn help_displays() {
        devbuild()
            .arg("--help")
            .assert()
            .success()
            .stdout(
                predicate::str::contains("Development build server")
                    .and(predicate::str::contains("Usage: devbuild")),
            );
    }

    #[test]
    fn version_displays() {
        devbuild()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("devbuild"));
    }

    #[test]
    fn products_plain_in_document_order() {
        let temp = project(CONFIG);
        devbuild()
            .args(["--home", &home_arg(&temp), "products", "--format", "plain"])
            .assert()
            .success()
            .stdout("A\nPyCharmCore\n");
    }

    #[test]
    fn build_known_prefix_writes_classpath() {
        let temp = project(CONFIG);
        devbuild()
            .args(["--home", &home_arg(&temp), "build", "A"])
            .assert()
            .success()
            .stdout(predicate::str::contains("generation 1"))
            .stdout(predicate::str::contains("run dir:"));

        let classpath = temp.path().join("out/dev-run/A/classpath.txt");
        let content = fs::read_to_string(classpath).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.lines().all(|line| Path::new(line).is_dir()));
    }

    #[test]
    fn build_repeated_prefix_revalidates() {
        let temp = project(CONFIG);
        let output = devbuild()
            .args(["--home", &home_arg(&temp), "build", "A", "A", "--format", "json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let reports: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(reports[0]["checks"], 0);
        assert_eq!(reports[1]["checks"], 1);
        assert_eq!(reports[1]["generation"], 1);
        assert_eq!(reports[1]["class"], "Foo");
        assert!(reports[1]["run_dir"]
            .as_str()
            .unwrap()
            .ends_with("out/dev-run/A"));
    }

    #[test]
    fn build_unknown_prefix_fails() {
        let temp = project(CONFIG);
        devbuild()
            .args(["--home", &home_arg(&temp), "build", "B"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("platform prefix `B`"))
            .stderr(predicate::str::contains("dev-build-server.json"));
    }

    #[test]
    fn malformed_config_fails() {
        let temp = project(r#"{"products": {"A": {"class": "Foo"}}}"#);
        devbuild()
            .args(["--home", &home_arg(&temp), "products"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Malformed configuration"));
    }

    #[test]
    fn missing_output_dir_fails() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("build")).unwrap();
        fs::write(temp.path().join("build/dev-build-server.json"), CONFIG).unwrap();
        devbuild()
            .args(["--home", &home_arg(&temp), "build", "A"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Output directory not found"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        devbuild()
            .args(["--home", &home_arg(&temp), "config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("dev-build-server.json"));
    }

    #[test]
    fn config_show_is_strict_json() {
        let temp = project(CONFIG);
        devbuild()
            .args(["--home", &home_arg(&temp), "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""class": "PyCharmProperties""#));
    }

    #[test]
    fn config_defaults_to_show() {
        let temp = project(CONFIG);
        devbuild()
            .args(["--home", &home_arg(&temp), "config"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""modules": ["#));
    }
}

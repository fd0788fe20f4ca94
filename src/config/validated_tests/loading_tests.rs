//! Tests for configuration file loading and generation.

use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, tempdir};

use crate::config::{default_config_template, write_default_config};
use crate::deploy::ValidationError;

use super::*;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

mod from_file {
    use super::*;

    #[test]
    fn load_merges_file_values() {
        let file = config_file(
            r#"
            [deploy]
            iaas = "AWS"
            region = "eu-west-2"
            workers = 2
        "#,
        );
        let invocation = deploy(&[]);
        let (cli, matches) = invocation.deploy().unwrap();

        let deployment = ValidatedDeploy::load(Some(file.path()), cli, matches).unwrap();

        assert_eq!(deployment.name, "my-ci");
        assert_eq!(deployment.args.region, "eu-west-2");
        assert_eq!(deployment.args.worker_count, 2);
        assert_eq!(deployment.explicit_flags, vec!["iaas", "region", "workers"]);
    }

    #[test]
    fn load_without_file_uses_cli_only() {
        let invocation = deploy(&["--iaas", "GCP", "--zone", "europe-west1-b"]);
        let (cli, matches) = invocation.deploy().unwrap();

        let deployment = ValidatedDeploy::load(None, cli, matches).unwrap();

        assert_eq!(deployment.args.iaas, "GCP");
        assert_eq!(deployment.args.zone, "europe-west1-b");
    }

    #[test]
    fn missing_file_returns_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let invocation = deploy(&["--iaas", "AWS"]);
        let (cli, matches) = invocation.deploy().unwrap();

        let result = ValidatedDeploy::load(Some(&path), cli, matches);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn invalid_toml_returns_parse_error() {
        let file = config_file("[deploy\niaas = ");
        let invocation = deploy(&["--iaas", "AWS"]);
        let (cli, matches) = invocation.deploy().unwrap();

        let result = ValidatedDeploy::load(Some(file.path()), cli, matches);

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}

mod validation {
    use super::*;

    #[test]
    fn missing_iaas_is_rejected() {
        let result = validate(&deploy(&[]), None);

        assert!(matches!(
            result,
            Err(ConfigError::Validation(ValidationError::MissingRequired {
                flag: "iaas"
            }))
        ));
    }

    #[test]
    fn validation_error_message_is_transparent() {
        let err = validate(&deploy(&["--iaas", "AWS", "--workers", "0"]), None).unwrap_err();

        assert_eq!(err.to_string(), "minimum value for --workers is 1");
    }

    #[test]
    fn first_failing_rule_wins() {
        let invocation = deploy(&[
            "--iaas",
            "AWS",
            "--tls-key",
            "key",
            "--add-tag",
            "bad tag",
        ]);

        let result = validate(&invocation, None);

        assert!(matches!(
            result,
            Err(ConfigError::Validation(
                ValidationError::MissingRequiredCompanion {
                    subject: "tls-key",
                    ..
                }
            ))
        ));
    }

    #[test]
    fn no_metrics_false_allows_retention_period() {
        let invocation = deploy(&[
            "--iaas",
            "AWS",
            "--no-metrics=false",
            "--influxdb-retention-period",
            "30d",
        ]);
        let (cli, matches) = invocation.deploy().unwrap();

        let deployment = ValidatedDeploy::load(None, cli, matches).unwrap();

        assert!(!deployment.args.no_metrics);
        assert_eq!(deployment.args.influxdb_retention, "30d");
    }

    #[test]
    fn no_metrics_rejects_retention_period() {
        let invocation = deploy(&[
            "--iaas",
            "AWS",
            "--no-metrics",
            "--influxdb-retention-period",
            "30d",
        ]);

        let result = validate(&invocation, None);

        assert!(matches!(
            result,
            Err(ConfigError::Validation(ValidationError::MutuallyExclusive {
                first: "no-metrics",
                second: "influxdb-retention-period",
            }))
        ));
    }

    #[test]
    fn bitbucket_auth_from_both_flags() {
        let invocation = deploy(&[
            "--iaas",
            "AWS",
            "--bitbucket-auth-client-id",
            "id",
            "--bitbucket-auth-client-secret",
            "secret",
        ]);

        let deployment = validate(&invocation, None).unwrap();

        assert!(deployment.args.explicit().bitbucket_auth());
    }

    #[test]
    fn invalid_main_team_user_is_rejected() {
        let invocation = deploy(&["--iaas", "AWS", "--main-team-github-users", "alice,-bob"]);

        let err = validate(&invocation, None).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Validation(ValidationError::InvalidFormat {
                flag: "main-team-github-users",
                ..
            })
        ));
    }
}

mod output {
    use super::*;

    #[test]
    fn json_output_redacts_secrets() {
        let invocation = deploy(&[
            "--iaas",
            "AWS",
            "--github-auth-client-id",
            "id",
            "--github-auth-client-secret",
            "s3cr3t",
        ]);
        let deployment = validate(&invocation, None).unwrap();

        let json = serde_json::to_value(&deployment).unwrap();

        assert_eq!(json["name"], "my-ci");
        assert_eq!(json["args"]["github_auth_client_id"], "id");
        assert_eq!(json["args"]["github_auth_client_secret"], "<redacted>");
        assert_eq!(json["args"]["tls_key"], "");
        assert!(json["args"].get("explicit").is_none());
        assert_eq!(
            json["explicit_flags"],
            serde_json::json!(["iaas", "github-auth-client-id", "github-auth-client-secret"])
        );
    }

    #[test]
    fn display_names_the_deployment() {
        let deployment = validate(&deploy(&["--iaas", "AWS"]), None).unwrap();

        assert!(deployment.to_string().starts_with("Deployment my-ci {"));
    }
}

mod generation {
    use super::*;

    #[test]
    fn write_default_config_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("concourse-deploy.toml");

        write_default_config(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, default_config_template());
        assert!(content.contains("[deploy]"));
    }

    #[test]
    fn write_default_config_to_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("config.toml");

        let result = write_default_config(&path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }

    #[test]
    fn generated_config_loads_and_validates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("concourse-deploy.toml");
        write_default_config(&path).unwrap();
        let invocation = deploy(&[]);
        let (cli, matches) = invocation.deploy().unwrap();

        let deployment = ValidatedDeploy::load(Some(Path::new(&path)), cli, matches).unwrap();

        assert_eq!(deployment.args.iaas, "AWS");
        assert_eq!(deployment.explicit_flags, vec!["iaas"]);
    }
}

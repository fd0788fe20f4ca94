//! Tests for CLI vs TOML precedence rules.

use crate::deploy::{Param, ValidationError};

use super::*;

mod cli_precedence {
    use super::*;

    #[test]
    fn cli_value_overrides_toml() {
        let invocation = deploy(&["--iaas", "AWS", "--worker-size", "large"]);
        let toml = toml(
            r#"
            [deploy]
            worker-size = "4xlarge"
        "#,
        );

        let deployment = validate(&invocation, Some(&toml)).unwrap();

        assert_eq!(deployment.args.worker_size, "large");
    }

    #[test]
    fn cli_bool_overrides_toml() {
        let invocation = deploy(&["--iaas", "AWS", "--spot=true"]);
        let toml = toml(
            r"
            [deploy]
            spot = false
        ",
        );

        let deployment = validate(&invocation, Some(&toml)).unwrap();

        assert!(deployment.args.spot);
    }

    #[test]
    fn cli_tags_replace_toml_tags() {
        let invocation = deploy(&["--iaas", "AWS", "--add-tag", "env=staging"]);
        let toml = toml(
            r#"
            [deploy]
            add-tag = ["env=prod", "team=ci"]
        "#,
        );

        let deployment = validate(&invocation, Some(&toml)).unwrap();

        assert_eq!(deployment.args.tags, vec!["env=staging"]);
    }

    #[test]
    fn cli_can_fix_invalid_toml_value() {
        let invocation = deploy(&["--iaas", "AWS", "--db-size", "medium"]);
        let toml = toml(
            r#"
            [deploy]
            db-size = "huge"
        "#,
        );

        let deployment = validate(&invocation, Some(&toml)).unwrap();

        assert_eq!(deployment.args.db_size, "medium");
    }
}

mod toml_precedence {
    use super::*;

    #[test]
    fn toml_value_overrides_default() {
        let invocation = deploy(&[]);
        let toml = toml(
            r#"
            [deploy]
            iaas = "AWS"
            workers = 3
            web-size = "medium"
        "#,
        );

        let deployment = validate(&invocation, Some(&toml)).unwrap();

        assert_eq!(deployment.args.iaas, "AWS");
        assert_eq!(deployment.args.worker_count, 3);
        assert_eq!(deployment.args.web_size, "medium");
    }

    #[test]
    fn toml_tags_used_without_cli_tags() {
        let invocation = deploy(&["--iaas", "AWS"]);
        let toml = toml(
            r#"
            [deploy]
            add-tag = ["env=prod"]
        "#,
        );

        let deployment = validate(&invocation, Some(&toml)).unwrap();

        assert_eq!(deployment.args.tags, vec!["env=prod"]);
    }

    #[test]
    fn toml_key_counts_as_explicitly_set() {
        let invocation = deploy(&["--iaas", "GCP"]);
        let toml = toml(
            r#"
            [deploy]
            worker-type = "m4"
        "#,
        );

        let result = validate(&invocation, Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::Validation(ValidationError::IaasRestricted {
                flag: "worker-type",
                ..
            }))
        ));
    }

    #[test]
    fn toml_no_metrics_false_keeps_retention_valid() {
        let invocation = deploy(&["--iaas", "AWS"]);
        let toml = toml(
            r#"
            [deploy]
            no-metrics = false
            influxdb-retention-period = "28d"
        "#,
        );

        let deployment = validate(&invocation, Some(&toml)).unwrap();

        assert!(deployment.args.explicit().is_set(Param::NoMetrics));
        assert!(!deployment.args.no_metrics);
    }

    #[test]
    fn toml_iaas_satisfies_required_flag() {
        let invocation = deploy(&[]);
        let toml = toml(
            r#"
            [deploy]
            iaas = "GCP"
        "#,
        );

        let deployment = validate(&invocation, Some(&toml)).unwrap();

        assert!(deployment.args.explicit().is_set(Param::Iaas));
    }

    #[test]
    fn preemptible_key_marks_spot() {
        let invocation = deploy(&["--iaas", "GCP"]);
        let toml = toml(
            r"
            [deploy]
            preemptible = false
        ",
        );

        let deployment = validate(&invocation, Some(&toml)).unwrap();

        assert!(!deployment.args.spot);
        assert!(deployment.args.explicit().is_set(Param::Spot));
    }
}

mod builtin_defaults {
    use super::*;
    use crate::deploy::defaults as builtin;

    #[test]
    fn defaults_apply_without_toml() {
        let deployment = validate(&deploy(&["--iaas", "AWS"]), None).unwrap();
        let args = &deployment.args;

        assert_eq!(args.worker_count, builtin::WORKER_COUNT);
        assert_eq!(args.worker_size, builtin::WORKER_SIZE);
        assert_eq!(args.worker_type, builtin::WORKER_TYPE);
        assert_eq!(args.db_size, builtin::DB_SIZE);
        assert_eq!(args.allow_ips, builtin::ALLOW_IPS);
        assert!(args.spot);
    }

    #[test]
    fn defaults_are_not_explicit() {
        let deployment = validate(&deploy(&["--iaas", "GCP"]), None).unwrap();

        assert_eq!(deployment.explicit_flags, vec!["iaas"]);
        assert!(!deployment.args.explicit().is_set(Param::WorkerType));
    }
}

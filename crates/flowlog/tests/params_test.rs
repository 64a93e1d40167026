use flowlog::{PipelineParams, Profiles};
use flowlog_report::OutputFormat;
use std::path::PathBuf;

fn minimal() -> PipelineParams {
    PipelineParams {
        base_url: Some("https://api.example.com".into()),
        api_token: Some("app-tok".into()),
        ..PipelineParams::default()
    }
}

#[test]
fn resolve_applies_defaults() {
    let resolved = minimal().resolve().unwrap();
    assert_eq!(resolved.page, 1);
    assert_eq!(resolved.limit, 20);
    assert_eq!(resolved.output_format, OutputFormat::Csv);
    assert_eq!(resolved.output_dir, PathBuf::from("."));
}

#[test]
fn resolve_requires_base_url_and_token() {
    let err = PipelineParams::default().resolve().unwrap_err();
    assert!(err.to_string().contains("base_url"));

    let err = PipelineParams {
        base_url: Some("https://api.example.com".into()),
        ..PipelineParams::default()
    }
    .resolve()
    .unwrap_err();
    assert!(err.to_string().contains("api_token"));
}

#[test]
fn resolve_rejects_limit_out_of_range() {
    for limit in [0, 101] {
        let err = PipelineParams {
            limit: Some(limit),
            ..minimal()
        }
        .resolve()
        .unwrap_err();
        assert!(err.to_string().contains("limit"), "limit {}", limit);
    }

    assert!(
        PipelineParams {
            limit: Some(100),
            ..minimal()
        }
        .resolve()
        .is_ok()
    );
}

#[test]
fn resolve_rejects_page_zero() {
    let err = PipelineParams {
        page: Some(0),
        ..minimal()
    }
    .resolve()
    .unwrap_err();
    assert!(err.to_string().contains("page"));
}

#[test]
fn node_executions_require_console_credentials() {
    let err = PipelineParams {
        with_node_executions: true,
        ..minimal()
    }
    .resolve()
    .unwrap_err();
    assert!(err.to_string().contains("console"));

    assert!(
        PipelineParams {
            with_node_executions: true,
            console_token: Some("tok".into()),
            ..minimal()
        }
        .resolve()
        .is_ok()
    );

    assert!(
        PipelineParams {
            with_node_executions: true,
            console_email: Some("ops@example.com".into()),
            console_password: Some("secret".into()),
            ..minimal()
        }
        .resolve()
        .is_ok()
    );

    // An email without a password is not a credential pair.
    assert!(
        PipelineParams {
            with_node_executions: true,
            console_email: Some("ops@example.com".into()),
            ..minimal()
        }
        .resolve()
        .is_err()
    );
}

#[test]
fn explicit_parameters_override_profile_values() {
    let profile = PipelineParams {
        base_url: Some("https://profile.example.com".into()),
        api_token: Some("profile-tok".into()),
        limit: Some(50),
        fetch_all: true,
        output_dir: Some(PathBuf::from("/var/reports")),
        ..PipelineParams::default()
    };

    let explicit = PipelineParams {
        base_url: Some("https://cli.example.com".into()),
        ..PipelineParams::default()
    };

    let merged = explicit.merge_profile(&profile);
    // Explicit wins.
    assert_eq!(merged.base_url.as_deref(), Some("https://cli.example.com"));
    // Profile fills the gaps.
    assert_eq!(merged.api_token.as_deref(), Some("profile-tok"));
    assert_eq!(merged.limit, Some(50));
    assert!(merged.fetch_all);
    assert_eq!(merged.output_dir, Some(PathBuf::from("/var/reports")));
}

#[test]
fn unknown_profile_names_available_ones() {
    let profiles: Profiles = toml::from_str(
        r#"
        [profiles.staging]
        base_url = "https://staging.example.com"

        [profiles.production]
        base_url = "https://api.example.com"
        "#,
    )
    .unwrap();

    let err = profiles.get("missing").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("unknown profile 'missing'"));
    assert!(message.contains("production"));
    assert!(message.contains("staging"));

    assert!(profiles.get("production").is_ok());
}

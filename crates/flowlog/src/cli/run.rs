//! CLI command handlers.

use crate::cli::RunArgs;
use chrono::{DateTime, Utc};
use flowlog::{Pipeline, PipelineParams, Profiles};
use flowlog_error::{ConfigError, FlowlogResult};
use tracing::info;

fn parse_time(label: &str, value: &str) -> FlowlogResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            ConfigError::new(format!("invalid {} timestamp '{}': {}", label, value, e)).into()
        })
}

fn params_from_args(args: &RunArgs) -> FlowlogResult<PipelineParams> {
    let created_at_after = args
        .created_at_after
        .as_deref()
        .map(|value| parse_time("--after", value))
        .transpose()?;
    let created_at_before = args
        .created_at_before
        .as_deref()
        .map(|value| parse_time("--before", value))
        .transpose()?;

    Ok(PipelineParams {
        base_url: args.base_url.clone(),
        api_token: args.api_token.clone(),
        app_id: args.app_id.clone(),
        console_token: args.console_token.clone(),
        console_email: args.console_email.clone(),
        console_password: args.console_password.clone(),
        keyword: args.keyword.clone(),
        status: args.status.map(Into::into),
        created_at_after,
        created_at_before,
        end_user_session_id: args.end_user_session_id.clone(),
        account_email: args.account_email.clone(),
        page: args.page,
        fetch_all: args.fetch_all,
        limit: args.limit,
        max_pages: args.max_pages,
        with_details: args.with_details,
        with_node_executions: args.with_node_executions,
        notify_on_complete: args.notify,
        output_format: args.format.map(Into::into),
        output_dir: args.output_dir.clone(),
    })
}

/// Handles `flowlog run`.
pub async fn handle_run_command(args: RunArgs) -> FlowlogResult<()> {
    let mut params = params_from_args(&args)?;

    if let Some(profile_name) = &args.profile {
        let profiles = Profiles::load()?;
        params = params.merge_profile(profiles.get(profile_name)?);
        info!(profile = %profile_name, "applied configuration profile");
    }

    let pipeline = Pipeline::new(params)?;
    let outcome = pipeline.run().await?;

    println!(
        "processed {} record(s), wrote {} {} report file(s):",
        outcome.report.data.len(),
        outcome.written.len(),
        outcome.format
    );
    for path in &outcome.written {
        println!("  {}", path.display());
    }

    Ok(())
}

/// Handles `flowlog profiles`.
pub fn handle_profiles_command() -> FlowlogResult<()> {
    let profiles = Profiles::load()?;

    if profiles.is_empty() {
        println!("no configuration profiles found");
        println!("add [profiles.<name>] sections to ./flowlog.toml or ~/.config/flowlog/flowlog.toml");
        return Ok(());
    }

    println!("available profiles:");
    for name in profiles.names() {
        println!("  {}", name);
    }

    Ok(())
}

use anyhow::{Context, Result, bail};
use colored::Colorize;
use leadgen_core::config::{Environment, VerifyFailurePolicy};
use std::process::ExitCode;

use crate::GlobalArgs;
use crate::bootstrap::{config_service, load_config};

pub struct ConfigChanges {
    pub api_url: Option<String>,
    pub environment: Option<String>,
    pub timeout_secs: Option<u64>,
    pub verify_failure: Option<String>,
}

pub fn show(global: &GlobalArgs) -> Result<ExitCode> {
    let service = config_service(global);
    let config = load_config(global);

    match service.path() {
        Some(path) => println!("{} {}", "# file:".dimmed(), path.display()),
        None => println!("{}", "# file: (none)".dimmed()),
    }
    let origin = if config.uses_default_base_url() {
        " (default)"
    } else {
        ""
    };
    println!(
        "{} {}{}",
        "# effective base URL:".dimmed(),
        config.base_url(),
        origin.dimmed()
    );
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(ExitCode::SUCCESS)
}

pub fn init(global: &GlobalArgs) -> Result<ExitCode> {
    let service = config_service(global);
    let created = service.ensure_file().context("Failed to write config file")?;
    let path = service
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    if created {
        println!("{} {}", "Created".green(), path);
    } else {
        println!("{} {}", "Already exists:".yellow(), path);
    }
    Ok(ExitCode::SUCCESS)
}

pub fn set(global: &GlobalArgs, changes: ConfigChanges) -> Result<ExitCode> {
    let environment = changes
        .environment
        .map(|e| {
            e.parse::<Environment>()
                .with_context(|| format!("Unknown environment '{}'", e))
        })
        .transpose()?;
    let verify_failure = changes
        .verify_failure
        .map(|p| {
            p.parse::<VerifyFailurePolicy>()
                .with_context(|| format!("Unknown verify failure policy '{}'", p))
        })
        .transpose()?;

    if changes.api_url.is_none()
        && environment.is_none()
        && changes.timeout_secs.is_none()
        && verify_failure.is_none()
    {
        bail!("Nothing to change; pass at least one option");
    }

    let saved = config_service(global)
        .update(|config| {
            if let Some(url) = changes.api_url {
                config.api.base_url = Some(url);
            }
            if let Some(env) = environment {
                config.environment = env;
            }
            if let Some(secs) = changes.timeout_secs {
                config.api.timeout_secs = Some(secs);
            }
            if let Some(policy) = verify_failure {
                config.session.verify_failure = policy;
            }
        })
        .context("Failed to update config file")?;

    println!("{}", "Configuration saved.".green());
    print!("{}", toml::to_string_pretty(&saved)?);
    Ok(ExitCode::SUCCESS)
}

use notas_core::api::normalize_base_url;

use crate::cli::ConfigCommands;
use crate::commands::common::{resolve_api_base_url, GlobalOptions, API_URL_ENV_VAR};
use crate::config_profiles::{default_config_path, normalize_text_option, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, global: &GlobalOptions) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init { no_activate } => run_config_init(global, no_activate),
        ConfigCommands::Show => run_config_show(global),
    }
}

pub fn run_config_init(global: &GlobalOptions, no_activate: bool) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(global.profile.as_deref());
    let existing_url = config
        .profile(&profile_name)
        .and_then(|profile| profile.api_base_url());

    let api_base_url = normalize_profile_url(global.api_url.clone(), existing_url)?;

    config.profile_mut_or_default(&profile_name).api_base_url = Some(api_base_url.clone());
    if !no_activate || config.active_profile.is_none() {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!("Saved profile '{profile_name}' ({api_base_url}) to {}", path.display());
    Ok(())
}

/// Validated URL for `config init`: the flag wins, the profile's current value is kept otherwise.
pub fn normalize_profile_url(
    explicit: Option<String>,
    existing: Option<String>,
) -> Result<String, CliError> {
    let url = normalize_text_option(explicit)
        .or(existing)
        .ok_or(CliError::ApiNotConfigured)?;
    Ok(normalize_base_url(&url)?)
}

pub fn run_config_show(global: &GlobalOptions) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(global.profile.as_deref());
    let api_url = resolve_api_base_url(
        global.api_url.clone(),
        std::env::var(API_URL_ENV_VAR).ok(),
        config.profile(&profile_name),
    );

    println!("config: {}", default_config_path().map_err(CliError::Config)?.display());
    println!("profile: {profile_name}");
    println!("api_url: {}", api_url.as_deref().unwrap_or("(not configured)"));
    println!("profiles: {}", config.profiles.keys().cloned().collect::<Vec<_>>().join(", "));
    Ok(())
}

use ferrous_doh_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Logged separately: the subscriber only exists once the config is known.
pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        protocol = %config.query.protocol,
        scheme = %config.transport.scheme,
        connect_timeout_ms = config.transport.connect_timeout_ms,
        read_timeout_ms = config.transport.read_timeout_ms,
        "Configuration loaded"
    );
}

use std::path::Path;

use crate::Config;

pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let config = parse(&content)?;
    log::debug!(path:% = path.display(); "Loaded configuration");

    Ok(config)
}

pub(crate) fn parse(content: &str) -> crate::Result<Config> {
    let config: Config = toml::from_str(content)?;

    if config.authentication.redirect.is_none() {
        log::warn!("No redirect configured in [authentication], the form authenticator cannot be built");
    }

    Ok(config)
}

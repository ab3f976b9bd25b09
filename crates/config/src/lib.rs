mod authentication;
mod error;
mod loader;

use std::{path::Path, str::FromStr};

use serde::Deserialize;

pub use authentication::{AuthenticationConfig, DEFAULT_PASSWORD_FIELD, DEFAULT_USERNAME_FIELD};
pub use error::Error;

pub type Result<T> = std::result::Result<T, error::Error>;

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub authentication: AuthenticationConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Config> {
        loader::load(path)
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        loader::parse(s)
    }
}

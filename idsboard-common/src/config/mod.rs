mod defaults;

use defaults::*;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::Secret;

/// Process configuration, layered from an optional file and the environment
/// (`DATABASE_URL`, `PORT`, `HOST`).
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IdsConfig {
    #[serde(default)]
    pub database_url: Option<Secret<String>>,

    #[serde(default = "_default_host")]
    pub host: String,

    #[serde(default = "_default_port")]
    pub port: u16,
}

impl Default for IdsConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            host: _default_host(),
            port: _default_port(),
        }
    }
}

impl IdsConfig {
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Name of the database selected by `database_url`, if the URL names one.
    pub fn database_name(&self) -> Option<String> {
        self.database_url
            .as_ref()
            .and_then(|url| database_name_from_url(url.expose_secret()))
    }
}

fn database_name_from_url(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(ToOwned::to_owned)
}

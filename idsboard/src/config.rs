use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, Source};
use idsboard_common::IdsConfig;
use tracing::*;

/// Loads the config file at `path` if it exists, overlaid with `DATABASE_URL`,
/// `PORT` and `HOST` from the environment.
pub fn load_config(path: &Path) -> Result<IdsConfig> {
    let config = build_config(
        File::from(path).required(false),
        Environment::default().try_parsing(true),
    )?;

    info!(
        "Using config: {path:?} (listen: {}, database: {})",
        config.listen_address(),
        if config.database_url.is_some() {
            "configured"
        } else {
            "not configured"
        },
    );
    Ok(config)
}

fn build_config<S>(file: S, environment: Environment) -> Result<IdsConfig>
where
    S: Source + Send + Sync + 'static,
{
    Config::builder()
        .add_source(file)
        .add_source(environment)
        .build()
        .context("Could not load config")?
        .try_deserialize()
        .context("Could not parse config")
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        Environment::default().try_parsing(true).source(Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn defaults_without_file_or_env() {
        let config = build_config(File::from_str("{}", FileFormat::Yaml), env(&[])).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.database_url.is_none());
    }

    #[test]
    fn environment_overrides_file() {
        let config = build_config(
            File::from_str("port: 9000\nhost: 127.0.0.1\n", FileFormat::Yaml),
            env(&[
                ("PORT", "8081"),
                ("DATABASE_URL", "sqlite:data/idsboard.sqlite3"),
            ]),
        )
        .unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "sqlite:data/idsboard.sqlite3"
        );
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(build_config(
            File::from_str("{}", FileFormat::Yaml),
            env(&[("PORT", "not-a-port")]),
        )
        .is_err());
    }
}

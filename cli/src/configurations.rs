// SPDX-FileCopyrightText: 2026 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, path::Path};

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

const ENVIRONMENT_VARIABLE: &str = "HACKBANK_ENVIRONMENT";
const ENV_PREFIX: &str = "HACKBANK";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub backend: BackendSettings,
    pub account: AccountSettings,
}

/// The hosted data service.
#[derive(Debug, Deserialize)]
pub struct BackendSettings {
    pub url: String,
    /// Public key of the project, sent with every request.
    #[serde(deserialize_with = "secret")]
    pub anon_key: SecretString,
}

/// The account the commands are run as.
#[derive(Debug, Deserialize)]
pub struct AccountSettings {
    pub email: String,
    #[serde(deserialize_with = "secret")]
    pub password: SecretString,
}

fn secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

/// The runtime environment selecting the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`.",
            )),
        }
    }
}

/// Loads the settings from `{prefix}configuration/`.
///
/// `base.yaml` is overlaid by the file of the environment selected with `HACKBANK_ENVIRONMENT`
/// (default `local`) and by `HACKBANK__`-prefixed environment variables, e.g.
/// `HACKBANK__ACCOUNT__EMAIL`.
pub fn get_configuration(prefix: &str) -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|error| config::ConfigError::Foreign(error.into()))?;
    let configuration_directory = base_path.join(prefix).join("configuration");

    let environment: Environment = std::env::var(ENVIRONMENT_VARIABLE)
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    load_settings(&configuration_directory, environment)
}

fn load_settings(
    configuration_directory: &Path,
    environment: Environment,
) -> Result<Settings, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(
            config::File::from(
                configuration_directory.join(format!("{}.yaml", environment.as_str())),
            )
            .required(false),
        )
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}

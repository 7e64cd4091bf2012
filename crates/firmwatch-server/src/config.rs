// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub check: CheckSettings,
    pub email: EmailSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    pub reference: ReferenceSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub shared_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckSettings {
    /// Seconds between reconciliation runs.
    #[serde(default = "default_check_interval_secs")]
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_address: String,
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,
    pub admin_recipients: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_db_path")]
    pub path: String,
}

/// Where the expected-firmware table lives. The CSV must carry `Serial` and
/// `LFV` header columns; everything else in the file is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceSettings {
    pub csv_path: String,
    #[serde(default = "default_csv_delimiter")]
    pub delimiter: char,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
    8310
}

fn default_check_interval_secs() -> u64 {
    86400
}

fn default_smtp_port() -> u16 {
    587
}

fn default_use_tls() -> bool {
    true
}

fn default_db_path() -> String {
    "./data/firmwatch.db".to_owned()
}

fn default_csv_delimiter() -> char {
    ';'
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_check_interval_secs(),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: Self =
            toml::from_str(&content).with_context(|| "Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.auth.shared_secret.is_empty()
            || self.auth.shared_secret == "change-me-to-a-strong-random-secret"
        {
            bail!("auth.shared_secret must be set to a strong random value");
        }
        if self.email.smtp_host.is_empty() {
            bail!("email.smtp_host must be set");
        }
        if self.email.admin_recipients.is_empty() {
            bail!("email.admin_recipients must contain at least one address");
        }
        if self.reference.csv_path.is_empty() {
            bail!("reference.csv_path must be set");
        }
        if !self.reference.delimiter.is_ascii() {
            bail!("reference.delimiter must be a single ASCII character");
        }
        if self.check.interval_secs == 0 {
            bail!("check.interval_secs must be greater than zero");
        }
        Ok(())
    }
}

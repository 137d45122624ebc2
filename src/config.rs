use std::env;

use anyhow::{anyhow, Context, Result};

const TOKEN_VAR: &str = "DISCORD_TOKEN";
const PORT_VAR: &str = "PORT";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug)]
pub struct Config {
    pub token: String,
    /// Port the liveness endpoint listens on.
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(env::var(TOKEN_VAR).ok(), env::var(PORT_VAR).ok())
    }

    fn from_vars(token: Option<String>, port: Option<String>) -> Result<Self> {
        let token = token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| anyhow!("{TOKEN_VAR} environment variable not set"))?;

        let port = match port.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_PORT,
            Some(port) => port
                .parse()
                .with_context(|| format!("{PORT_VAR} must be a port number, got {port:?}"))?,
        };

        Ok(Self { token, port })
    }
}

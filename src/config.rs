//! Connection settings read from the environment once at startup.

use crate::error::{AppError, Result};
use sqlx::postgres::PgConnectOptions;
use std::env;
use std::str::FromStr;
use tracing::{debug, error};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Config {
    /// A full connection string from `DATABASE_URL`.
    Url(String),
    /// Individual settings from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME`.
    Parts {
        host: String,
        port: u16,
        user: String,
        password: String,
        database: String,
    },
}

impl Config {
    /// Reads the process environment. `.env` is loaded by `main` beforehand.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the settings from an arbitrary key lookup.
    ///
    /// `DATABASE_URL` takes precedence. Otherwise user, password and database name are
    /// required and host and port fall back to `localhost:5432`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
            debug!("Using DATABASE_URL for the connection");
            return Ok(Config::Url(url));
        }

        let required = |key: &str| {
            lookup(key).ok_or_else(|| {
                error!("{} environment variable not set", key);
                AppError::Config(format!("{key} is not set (or set DATABASE_URL)"))
            })
        };

        let port = match lookup("DB_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| {
                error!("Invalid DB_PORT {:?}: {}", raw, e);
                AppError::Config(format!("DB_PORT must be a port number, got {raw:?}"))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Config::Parts {
            host: lookup("DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            user: required("DB_USER")?,
            password: required("DB_PASSWORD")?,
            database: required("DB_NAME")?,
        })
    }

    /// Turns the settings into sqlx connect options.
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        match self {
            Config::Url(url) => Ok(PgConnectOptions::from_str(url)?),
            Config::Parts {
                host,
                port,
                user,
                password,
                database,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .password(password)
                .database(database)),
        }
    }
}

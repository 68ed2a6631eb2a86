//! Application configuration management.
//!
//! Configuration comes from environment variables, optionally seeded from a
//! `.env` file. The `envy` crate deserializes them into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a variable cannot be
    /// parsed into its expected type.
    pub fn from_env() -> Result<Self, envy::Error> {
        // Loading the .env file is best-effort; a missing file is fine.
        dotenvy::dotenv().ok();

        // Field names map to upper-case variables: database_url -> DATABASE_URL.
        envy::from_env::<Config>()
    }
}

use altis_core::AllocationPolicy;
use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub seating: AllocationPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 { 5 }
fn default_acquire_timeout() -> u64 { 3 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Layers `default`, `{RUN_MODE}` and `local` files from `dir`, then `ALTIS_*` env vars.
    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let file = |name: &str| dir.join(name).to_string_lossy().into_owned();

        let s = config::Config::builder()
            .add_source(config::File::with_name(&file("default")))
            .add_source(config::File::with_name(&file(&run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name(&file("local")).required(false))
            // e.g. `ALTIS_DATABASE__URL=postgres://...`
            .add_source(
                config::Environment::with_prefix("ALTIS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}

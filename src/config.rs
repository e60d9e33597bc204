use std::env;

pub const DEFAULT_SINTEGRA_BASE_URL: &str = "https://www.sintegraws.com.br";
pub const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br";

/// Runtime settings, read once at startup from the environment.
///
/// `database_url` and `sintegra_token` are optional: the server starts
/// without them and the endpoints that need them answer with a
/// configuration error instead.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub database_url: Option<String>,
    pub sintegra_token: Option<String>,
    pub sintegra_base_url: String,
    pub viacep_base_url: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").ok(),
            sintegra_token: env::var("SINTEGRA_TOKEN").ok(),
            sintegra_base_url: env::var("SINTEGRA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_SINTEGRA_BASE_URL.to_string()),
            viacep_base_url: env::var("VIACEP_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_VIACEP_BASE_URL.to_string()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: None,
            sintegra_token: None,
            sintegra_base_url: DEFAULT_SINTEGRA_BASE_URL.to_string(),
            viacep_base_url: DEFAULT_VIACEP_BASE_URL.to_string(),
        }
    }
}

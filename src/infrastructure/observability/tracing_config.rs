#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

impl TracingConfig {
    /// `LOG_FORMAT=json` forces JSON output whatever the settings say.
    pub fn new(environment: impl Into<String>, json_format: bool, filter: Option<String>) -> Self {
        let forced_json = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self {
            environment: environment.into(),
            json_format: json_format || forced_json,
            filter,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        let environment =
            std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
        Self::new(environment, false, None)
    }
}

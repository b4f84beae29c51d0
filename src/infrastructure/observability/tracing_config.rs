const QUIET_TARGETS: &str = "pdf_oxide=warn,hyper=warn,reqwest=warn";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub level: String,
    pub json_format: bool,
}

impl TracingConfig {
    /// Filter directive used when `RUST_LOG` is unset. The PDF parser and
    /// the HTTP client stay at `warn` whatever the level.
    pub fn default_filter(&self) -> String {
        format!(
            "{level},docdelta={level},tower_http=info,{QUIET_TARGETS}",
            level = self.level
        )
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            level: "info".to_string(),
            json_format: false,
        }
    }
}

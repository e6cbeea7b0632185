use std::env;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub metrics_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            metrics_port: 9090,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        // PORT wins over the compose-level internal port
        let port = env::var("PORT")
            .ok()
            .or_else(|| env::var("LESSONS_INTERNAL_API_PORT").ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            metrics_port: env::var("METRICS_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.metrics_port),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

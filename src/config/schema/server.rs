use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interactions endpoint port (default: 3000)
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Interactions endpoint host (default: 127.0.0.1)
    #[serde(default = "default_server_host")]
    pub host: String,
}

fn default_server_port() -> u16 {
    3000
}

fn default_server_host() -> String {
    "127.0.0.1".into()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            host: default_server_host(),
        }
    }
}

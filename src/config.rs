use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime settings. Only `debug` is exposed on the command line.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Directory holding the six input files.
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// Verbose logging and pretty-printed callback payloads.
    pub debug: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8050)),
            debug: false,
        }
    }
}

impl DashboardConfig {
    /// Default log filter; `RUST_LOG` still takes precedence.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

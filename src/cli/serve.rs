//! Serve subcommand: run the API server in the foreground.

use clap::Args;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::server;
use crate::store::MemoryStore;

/// Arguments for the serve subcommand
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Bind host (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Apply CLI overrides to the server section of `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Run the server until Ctrl-C. Tasks live only as long as the process.
pub async fn run(args: &ServeArgs, mut config: Config) -> anyhow::Result<()> {
    args.apply(&mut config);
    let addr = config.server.bind_addr()?;
    info!(%addr, "Starting task API with an empty in-memory store");
    server::serve(Arc::new(MemoryStore::new()), addr).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_config() {
        let mut config = Config::default();
        let args = ServeArgs {
            host: Some("0.0.0.0".into()),
            port: Some(8080),
        };
        args.apply(&mut config);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn absent_flags_keep_config() {
        let mut config = Config::default();
        ServeArgs::default().apply(&mut config);
        assert_eq!(config, Config::default());
    }
}

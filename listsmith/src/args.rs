use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Listsmith listing optimizer
#[derive(Debug, Parser)]
#[command(name = "listsmith", about = "Marketplace listing optimizer backed by subscription-gated LLMs")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "listsmith.toml", env = "LISTSMITH_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "LISTSMITH_LISTEN")]
    pub listen: Option<SocketAddr>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_config() {
        let args = Args::try_parse_from(["listsmith"]).unwrap();
        assert_eq!(args.config, PathBuf::from("listsmith.toml"));
        assert!(args.listen.is_none());
    }

    #[test]
    fn accepts_listen_override() {
        let args = Args::try_parse_from(["listsmith", "-c", "prod.toml", "--listen", "127.0.0.1:8080"]).unwrap();
        assert_eq!(args.config, PathBuf::from("prod.toml"));
        assert_eq!(args.listen, Some(SocketAddr::from(([127, 0, 0, 1], 8080))));
    }
}

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "depot",
    about = "depot — namespaced JSON document store over HTTP",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the depot server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides config file and environment)
    #[arg(long)]
    pub bind: Option<String>,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Connections opened eagerly at startup
    #[arg(long)]
    pub pool_min: Option<usize>,

    /// Upper bound on concurrently open connections
    #[arg(long)]
    pub pool_max: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["depot", "serve"]).unwrap();
        let Command::Serve(args) = cli.command;
        assert!(args.bind.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn parse_serve_with_flags() {
        let cli = Cli::try_parse_from([
            "depot",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--db",
            "/tmp/depot.db",
            "--pool-max",
            "64",
        ])
        .unwrap();
        let Command::Serve(args) = cli.command;
        assert_eq!(args.bind, Some("0.0.0.0:8080".into()));
        assert_eq!(args.db, Some(PathBuf::from("/tmp/depot.db")));
        assert_eq!(args.pool_max, Some(64));
        assert!(args.pool_min.is_none());
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["depot", "--verbose", "serve"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_config_file() {
        let cli = Cli::try_parse_from(["depot", "serve", "-c", "depot.toml"]).unwrap();
        let Command::Serve(args) = cli.command;
        assert_eq!(args.config, Some(PathBuf::from("depot.toml")));
    }
}

use colored::Colorize;

use depot_server::{DepotServer, ServerConfig};

use crate::cli::{Cli, Command, ServeArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind.parse()?;
    }
    if let Some(db) = args.db {
        config.store.path = db;
    }
    if let Some(min) = args.pool_min {
        config.store.pool_min = min;
    }
    if let Some(max) = args.pool_max {
        config.store.pool_max = max;
    }

    println!(
        "{} depot listening on {} (db: {})",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config.store.path.display()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(DepotServer::new(config).serve())?;
    Ok(())
}

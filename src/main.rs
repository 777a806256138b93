mod actions;
mod config;
mod errors;
mod logging;
mod security;
mod server;
mod tools;


use crate::config::Config;
use anyhow::Context;
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path = PathBuf::from("gatehouse.toml");
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--config" {
            i += 1;
            if i >= args.len() {
                eprintln!("--config requires a path");
                std::process::exit(2);
            }
            config_path = PathBuf::from(&args[i]);
        }
        i += 1;
    }

    // Load fails fast when the API key is missing from the environment.
    let cfg = Config::load(&config_path).context("loading config")?;
    cfg.validate().context("validating config")?;

    let addr = format!("{}:{}", cfg.server.bind_addr, cfg.server.port);
    let root = cfg.sandbox.root_dir.display().to_string();

    let state = server::AppState::new(cfg).context("building gateway state")?;

    info!(addr = %addr, root_dir = %root, "gatehouse ready");
    println!("gatehouse ready addr={addr} root_dir={root}");

    server::serve(state).await
}

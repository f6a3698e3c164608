//! # filiera
//!
//! Runs a command script against a freshly started marketplace. Each line is one
//! command (`login mario pw`, `approve_content 1`, ...); blank lines and `#` comments
//! are skipped. After every line the current identity is printed.
//!
//! ```bash
//! filiera script.txt
//! RUST_LOG=debug filiera --seed --free-access < script.txt
//! FILIERA_LOG_FORMAT=json filiera --seed script.txt
//! ```

use actor_framework::tracing::{setup_tracing, LogFormat};
use anyhow::Context;
use clap::Parser;
use filiera::dispatch::ActionDispatcher;
use filiera::lifecycle::{
    configure_dispatcher, default_prototypes, seed_demo, Config, MarketplaceSystem,
};
use filiera::session::SessionState;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "filiera")]
#[command(about = "Run marketplace commands from a script or stdin")]
#[command(version)]
struct Cli {
    /// Command script; stdin when absent
    input: Option<PathBuf>,

    /// Authorization gates approve every command
    #[arg(long, env = "FILIERA_FREE_ACCESS")]
    free_access: bool,

    /// Log output format (compact or json)
    #[arg(long, env = "FILIERA_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Register demo actors, a product and an approved `admin` account first
    #[arg(long)]
    seed: bool,
}

async fn open(input: Option<&PathBuf>) -> anyhow::Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    Ok(match input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("opening {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    })
}

async fn serve(dispatcher: &ActionDispatcher, input: Option<&PathBuf>) -> anyhow::Result<()> {
    let mut session = SessionState::new();
    let mut lines = open(input).await?.lines();

    while let Some(line) = lines.next_line().await.context("reading commands")? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match dispatcher.dispatch_line(&mut session, line).await {
            Ok(reply) => println!("{reply}"),
            Err(e) => println!("error: {e}"),
        }
        match session.current() {
            Some(identity) => println!("Logged user: {}", identity.name),
            None => println!("Logged user: none"),
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let mut config = Config::from_env().context("loading configuration")?;
    config.free_access |= cli.free_access;
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    setup_tracing(config.log_format);
    if config.free_access {
        warn!("Free access enabled: authorization is not enforced");
    }

    let prototypes = default_prototypes().context("registering default prototypes")?;
    let system = MarketplaceSystem::new(&config, prototypes);

    if cli.seed {
        let demo = seed_demo(&system).await.context("seeding demo data")?;
        info!(admin = %demo.admin, "Demo data ready");
    }

    let dispatcher = configure_dispatcher(&system, &config);
    let served = serve(&dispatcher, cli.input.as_ref()).await;

    // Handlers hold client clones.
    drop(dispatcher);
    system.shutdown().await.context("shutting down")?;
    served
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

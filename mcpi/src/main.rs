use clap::Parser;
use eyre::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use mcpi::cli::{Cli, Command, RunArgs};
use mcpi::config::Config;
use mcpi::facade::IngestFacade;

/// Map a log level name to a tracing level, falling back to INFO
fn parse_level(level_str: Option<&str>) -> tracing::Level {
    let Some(s) = level_str else {
        return tracing::Level::INFO;
    };
    match s.to_uppercase().as_str() {
        "TRACE" => tracing::Level::TRACE,
        "DEBUG" => tracing::Level::DEBUG,
        "INFO" => tracing::Level::INFO,
        "WARN" | "WARNING" => tracing::Level::WARN,
        "ERROR" => tracing::Level::ERROR,
        _ => {
            // Logging isn't up yet
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
            tracing::Level::INFO
        }
    }
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > default (INFO)
    let level = parse_level(cli_log_level.or(config_log_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    debug!(?level, "Logging initialized");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Some(Command::Run(args)) => cmd_run(config, args).await,
        Some(Command::Config) => cmd_config(&config),
        None => cmd_run(config, RunArgs::default()).await,
    }
}

async fn cmd_run(mut config: Config, args: RunArgs) -> Result<()> {
    debug!(?args, "cmd_run: called");
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let mut session = IngestFacade::start(&config).await.context("Failed to start session")?;
    if let Some(addr) = session.local_addr() {
        println!("Open http://{} to watch the estimate converge", addr);
    }

    if args.no_wait {
        session.ready_trigger().fire();
    } else {
        info!("Waiting for a viewer to connect");
    }
    session.wait_ready().await?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!(points = args.points, "Sampling");
    for _ in 0..args.points {
        session.plot(rng.random::<f64>(), rng.random::<f64>()).await?;
    }

    let summary = session.quit().await?;
    match summary.report.estimate {
        Some(pi) => println!("n = {}, pi ~ {:.6}", summary.report.n, pi),
        None => println!("n = 0, no estimate"),
    }
    println!("total runtime: {:?}", summary.runtime);
    Ok(())
}

fn cmd_config(config: &Config) -> Result<()> {
    print!("{}", config.to_yaml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(Some("debug")), tracing::Level::DEBUG);
        assert_eq!(parse_level(Some("Warning")), tracing::Level::WARN);
        assert_eq!(parse_level(None), tracing::Level::INFO);
    }

    #[test]
    fn test_unknown_level_defaults_to_info() {
        assert_eq!(parse_level(Some("chatty")), tracing::Level::INFO);
    }
}

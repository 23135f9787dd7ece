mod config;
mod session;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};
use rand::rngs::StdRng;
use twenty48_engine::engine::GridEngine;

use config::Config;
use session::{Outcome, Session};

#[derive(Parser, Debug)]
#[command(name = "twenty48", version, about = "Play 2048 from the terminal")]
struct Args {
    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,
    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
    /// Comma-separated commands to run instead of reading stdin,
    /// e.g. "left,up,swipe 40 -3,r"
    #[arg(long, value_name = "CMDS")]
    moves: Option<String>,
    /// Log filter, e.g. "info", "debug" (overrides the config file)
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::from_toml(path)?,
        None => Config::default(),
    };
    let filter = args.log.clone().unwrap_or_else(|| config.log.clone());
    env_logger::Builder::from_env(Env::default().default_filter_or(filter)).init();

    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    info!("seed {seed}");
    let mut session: Session<StdRng> = Session::new(GridEngine::from_seed(seed), config.keys.clone());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&mut out, &session, &config)?;

    let lines: Box<dyn Iterator<Item = io::Result<String>>> = match &args.moves {
        Some(script) => Box::new(
            script
                .split(',')
                .map(|s| Ok(s.to_string()))
                .collect::<Vec<_>>()
                .into_iter(),
        ),
        None => Box::new(io::stdin().lock().lines()),
    };

    for line in lines {
        let line = line.context("reading input")?;
        if line.trim().is_empty() {
            continue;
        }
        let cmd = match session.parse(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };
        match session.apply(cmd) {
            Outcome::Quit => break,
            Outcome::Moved | Outcome::Restarted => render(&mut out, &session, &config)?,
            Outcome::Unchanged if config.display.redraw_unchanged => {
                render(&mut out, &session, &config)?
            }
            Outcome::Unchanged => {}
        }
    }

    writeln!(
        out,
        "Final score: {} after {} moves (highest tile {})",
        session.engine().score(),
        session.moves(),
        session.engine().board().highest_tile()
    )?;
    Ok(())
}

fn render<W: Write>(out: &mut W, session: &Session<StdRng>, config: &Config) -> io::Result<()> {
    writeln!(out, "{}", session.engine().board())?;
    if config.display.show_score {
        writeln!(out, "Score: {}", session.engine().score())?;
    }
    out.flush()
}

//! ATM operator console.
//!
//! Wires the in-memory adapters to an [`AtmController`] and drives it from
//! a script file, from stdin, or through the built-in demo session.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  atm-console (driver)                                    │
//! │    script / stdin lines ──▶ SessionCommand               │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ──────────────     │
//! │                                                          │
//! │  InMemoryBank · InMemoryDispenser · FixedCardReader      │
//! │  LogEventSink                                            │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use atm_terminal::AtmController;
use atm_terminal::adapters::bank::InMemoryBank;
use atm_terminal::adapters::card_reader::FixedCardReader;
use atm_terminal::adapters::dispenser::InMemoryDispenser;
use atm_terminal::adapters::log_sink::LogEventSink;
use atm_terminal::config::TerminalConfig;
use atm_terminal::console::run_lines;
use atm_terminal::error::SessionError;
use atm_terminal::fsm::context::AccountId;

#[derive(Parser, Debug)]
#[command(name = "atm-console", version, about = "Drive an ATM session from the console")]
struct Cli {
    /// JSON terminal configuration (defaults to the built-in fixture)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Run commands from this file, one per line
    #[arg(long, conflicts_with = "demo")]
    script: Option<PathBuf>,
    /// Run the reference session against the built-in fixture and check
    /// its results
    #[arg(long, conflicts_with = "config")]
    demo: bool,
}

type Console = AtmController<InMemoryBank, InMemoryDispenser, FixedCardReader, LogEventSink>;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            TerminalConfig::from_json(&raw).with_context(|| format!("loading {}", path.display()))?
        }
        None => TerminalConfig::default(),
    };
    info!(
        "Terminal {} starting with {} in cassette",
        config.terminal_id, config.cash_on_hand
    );

    let mut atm: Console = AtmController::with_sink(
        InMemoryBank::from_config(&config)?,
        InMemoryDispenser::new(config.cash_on_hand),
        FixedCardReader::new(config.inserted_card_id()?),
        LogEventSink::new(config.terminal_id.clone()),
    );

    if cli.demo {
        run_demo(&mut atm)?;
        println!("All ATM session checks passed!");
        return Ok(());
    }

    let executed = match &cli.script {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            run_lines(&mut atm, io::BufReader::new(file), io::stdout().lock())
        }
        None => run_lines(&mut atm, io::stdin().lock(), io::stdout().lock()),
    }
    .context("reading command input")?;
    info!("Executed {} commands", executed);

    atm.eject_card();
    info!("Session closed after {} events", atm.sink().emitted());
    Ok(())
}

// ── Reference session ─────────────────────────────────────────

fn run_demo(atm: &mut Console) -> Result<()> {
    let account = AccountId::new("ACC-111")?;

    atm.insert_card()?;
    ensure!(!atm.enter_pin("0000")?, "wrong PIN must be rejected");
    ensure!(atm.enter_pin("4321")?, "correct PIN must be accepted");

    atm.select_account(account)?;
    let opening = atm.get_balance()?;
    info!("Opening balance {}", opening);

    atm.deposit(50)?;
    ensure!(atm.get_balance()? == opening + 50, "deposit not reflected");

    atm.withdraw(70)?;
    ensure!(atm.get_balance()? == opening - 20, "withdrawal not reflected");

    let overdraw = atm.withdraw(opening + 1_000);
    ensure!(
        matches!(overdraw, Err(SessionError::InsufficientFunds { .. })),
        "overdraw must be refused, got {overdraw:?}"
    );

    atm.eject_card();
    ensure!(
        atm.enter_pin("4321") == Err(SessionError::NoCardInserted),
        "eject must clear the session"
    );
    Ok(())
}

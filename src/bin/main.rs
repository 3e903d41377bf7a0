//! Line-oriented REPL demo.
//!
//! Stands in for the speech-to-text collaborator: each stdin line is one
//! utterance. The ledger is printed after every mutating turn through a
//! `LedgerObserver`, the way a rendering layer would redraw.

use expense_agent::{
    AgentConfig, ExpenseEntry, ExpenseSession, LedgerObserver, TurnOutcome,
};
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

struct PrintingObserver;

impl LedgerObserver for PrintingObserver {
    fn ledger_changed(&self, entries: &[ExpenseEntry]) {
        println!("--- ledger ({} entries) ---", entries.len());
        for entry in entries {
            println!(
                "  {}  {:>8.2}  {:<12}  {}  [{}]",
                entry.date.format("%Y-%m-%d %H:%M:%S"),
                entry.amount,
                entry.category,
                entry.title,
                entry.id,
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!("Expense agent starting");

    let config = AgentConfig::from_env()?;
    let mut session = ExpenseSession::new(&config)?;
    session.add_observer(Arc::new(PrintingObserver));

    println!("Describe an expense (Ctrl-D to quit):");

    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match session.chat(&line).await {
            Ok(TurnOutcome::LedgerChanged) => {}
            Ok(TurnOutcome::Reply(text)) => println!("{}", text),
            Ok(TurnOutcome::NoEffect) => println!("(no effect)"),
            Err(e) => eprintln!("turn failed: {}", e),
        }
    }

    Ok(())
}

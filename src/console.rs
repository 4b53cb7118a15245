//! Line-driven console session.
//!
//! One command per line, in the syntax accepted by
//! [`SessionCommand::from_str`](crate::app::commands::SessionCommand).
//! Each line produces one line of output: the outcome, or `error: …`.

use std::io::{self, BufRead, Write};

use log::warn;

use crate::app::commands::SessionCommand;
use crate::app::ports::{BankGateway, CardReader, CashDispenser, EventSink};
use crate::app::service::AtmController;

/// Execute every command in `input`, writing one result line per command
/// to `out`.  Blank lines and `#` comments are skipped; a bad line or a
/// refused operation is reported and the loop carries on.
///
/// Returns the number of commands executed.  Only I/O failures abort.
pub fn run_lines<B, D, R, S>(
    atm: &mut AtmController<B, D, R, S>,
    input: impl BufRead,
    mut out: impl Write,
) -> io::Result<usize>
where
    B: BankGateway,
    D: CashDispenser,
    R: CardReader,
    S: EventSink,
{
    let mut executed = 0;
    for (n, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cmd: SessionCommand = match line.parse() {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!("line {}: {}", n + 1, e);
                writeln!(out, "error: {e}")?;
                continue;
            }
        };
        executed += 1;
        match atm.handle_command(cmd) {
            Ok(outcome) => writeln!(out, "{outcome}")?,
            Err(e) => writeln!(out, "error: {e}")?,
        }
    }
    out.flush()?;
    Ok(executed)
}

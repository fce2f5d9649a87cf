//! The read-eval-print loop.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::commands::dispatch;
use crate::session::Session;

/// Startup banner.
pub const BANNER: &str = "=========== zkcli ===========";

/// Printed before every read, without a newline.
pub const PROMPT: &str = ">";

/// Line that ends the loop. Must match exactly after the line ending is
/// removed.
pub const QUIT: &str = "quit";

/// Printed when the loop ends.
pub const FAREWELL: &str = "Bye bye!";

/// Runs the loop until `quit` or end of input and returns the number of
/// lines dispatched.
///
/// Command failures are printed and the loop continues.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `out` fails.
pub fn run<S, R, W>(session: &S, mut input: R, out: &mut W) -> io::Result<usize>
where
    S: Session + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut raw = Vec::new();
    let mut dispatched = 0;

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        raw.clear();
        if input.read_until(b'\n', &mut raw)? == 0 {
            // Keep the farewell off the prompt line.
            writeln!(out)?;
            debug!("end of input");
            break;
        }

        // Invalid UTF-8 is replaced rather than ending the loop.
        let line = String::from_utf8_lossy(&raw);
        let command = line.trim_end_matches(['\r', '\n']);
        if command == QUIT {
            break;
        }
        dispatch(session, command, out)?;
        dispatched += 1;
    }

    writeln!(out, "{FAREWELL}")?;
    out.flush()?;
    Ok(dispatched)
}

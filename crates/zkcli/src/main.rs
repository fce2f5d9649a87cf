//! zkcli binary entrypoint.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use zkcli::events::{self, EventListener};
use zkcli::shell::{self, BANNER};
use zkcli::{CliError, Invocation, ShellConfig, ZkSession};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "ZKCLI_LOG";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    println!("{BANNER}");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Io(e)) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let invocation = Invocation::parse(env::args().skip(1))?;
    let config = ShellConfig::from_env()?.with_server(invocation.server);
    config.validate()?;

    // One worker is plenty for the event listener.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("zkcli-events")
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    let (events_tx, events_rx) = events::channel();
    let listener = EventListener::spawn(runtime.handle(), events_rx, config.print_events);

    let session = match ZkSession::connect(&config.server, config.session_timeout, events_tx) {
        Ok(session) => session,
        Err(source) => {
            runtime.block_on(listener.shutdown());
            return Err(CliError::Connect {
                address: config.server,
                source,
            });
        }
    };
    println!("connected to {}", config.server);

    // Stdout stays unlocked between writes so echoed events can interleave.
    let mut stdout = io::stdout();
    let result = shell::run(&session, io::stdin().lock(), &mut stdout);
    stdout.flush()?;

    if let Err(e) = session.close() {
        warn!(error = %e, "failed to close session");
    }
    let handled = runtime.block_on(listener.shutdown());
    info!(events = handled, "event listener stopped");

    let dispatched = result?;
    info!(commands = dispatched, "shell finished");
    Ok(())
}

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Env var holding the tracing filter directive
pub const LOG_ENV: &str = "TODOTREE_LOG";

/// Install the global tracing subscriber.
///
/// The terminal belongs to the TUI, so logs go to `log_file` (appended,
/// without ANSI colors) or nowhere at all.
pub fn init_logging(log_file: Option<&Path>) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false);

    let _ = match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            builder.with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::sink).try_init(),
    };
    Ok(())
}

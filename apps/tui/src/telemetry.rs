use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Where log events go for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sinks {
    file: bool,
    stderr: bool,
}

/// The interactive dashboard owns the terminal, so it only logs to a file.
/// Headless runs always log to stderr, and to the file as well when one is set.
const fn sinks(has_log_file: bool, interactive: bool) -> Sinks {
    Sinks {
        file: has_log_file,
        stderr: !interactive,
    }
}

/// Install the tracing subscriber.
pub fn init(debug: bool, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let sinks = sinks(log_file.is_some(), interactive);
    if !sinks.file && !sinks.stderr {
        return Ok(());
    }

    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };
    let stderr_layer = sinks
        .stderr
        .then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| eyre!("failed to install tracing subscriber: {e}"))
}

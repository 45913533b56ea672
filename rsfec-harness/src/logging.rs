//! Logger setup for the exerciser binary.

use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the logger for the given `-v` count: 0 shows info, 1 adds
/// debug, 2 or more adds trace. `RUST_LOG` overrides the chosen filter.
pub fn init_logger(verbosity: u8) {
    INIT.call_once(|| {
        let level = match verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        let mut builder = Builder::new();
        builder.filter(None, level).format(|buf, record| {
            let level_style = match record.level() {
                Level::Error => "\x1b[31m", // Red
                Level::Warn => "\x1b[33m",  // Yellow
                Level::Info => "\x1b[32m",  // Green
                Level::Debug => "\x1b[34m", // Blue
                Level::Trace => "\x1b[35m", // Magenta
            };

            writeln!(
                buf,
                "[{}{:5}\x1b[0m {}] {}",
                level_style,
                record.level(),
                record.target(),
                record.args()
            )
        });

        // Also check RUST_LOG environment variable
        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            builder.parse_filters(&rust_log);
        }

        builder.init();
    });
}

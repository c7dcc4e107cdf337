use std::io;

use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;

fn logging_level(verbose: bool) -> LevelFilter {
    match std::env::var("CODEC_DEBUG").as_deref() {
        Ok("trace") => LevelFilter::Trace,
        Ok("debug") => LevelFilter::Debug,
        Ok("info") => LevelFilter::Info,
        Ok("warn") => LevelFilter::Warn,
        Ok("error") => LevelFilter::Error,
        _ if verbose => LevelFilter::Info,
        _ => LevelFilter::Warn,
    }
}

/// Installs the global logger. With `--verbose` the per-operation `[INFO]`
/// report is shown; `CODEC_DEBUG` overrides the level for troubleshooting.
pub fn setup_logger(verbose: bool) {
    let level_filter = logging_level(verbose);

    if let Err(e) = Dispatch::new()
        .format(move |out, message, record| match level_filter {
            LevelFilter::Off | LevelFilter::Error | LevelFilter::Warn | LevelFilter::Info => {
                out.finish(format_args!("[{}] {}", record.level(), message));
            }
            LevelFilter::Debug | LevelFilter::Trace => {
                let file = record.file().unwrap_or("unknown_file");
                let line = record.line().unwrap_or(0);
                out.finish(format_args!(
                    "[{}][{}]: {} <{}:{}>",
                    Local::now().format("%b-%d-%Y %H:%M:%S.%f"),
                    record.level(),
                    message,
                    file,
                    line,
                ));
            }
        })
        .level(level_filter)
        .chain(io::stderr())
        .apply()
    {
        eprintln!("Logger initialization failed: {e}");
    }
    log::debug!("Enabled log {level_filter}.");
}

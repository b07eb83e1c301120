//! Diagnostic logging through the `log` facade.
//!
//! Records go to standard error with a fixed prefix. Nothing here is safe to use from a signal
//! handler or from a child between `fork` and `exec`.

use std::io::Write;

use log::{LevelFilter, Log};

pub struct SimpleLogger<W: Send + Sync>
where
    for<'a> &'a W: Write,
{
    target: W,
    prefix: &'static str,
}

impl<W: Send + Sync> Log for SimpleLogger<W>
where
    for<'a> &'a W: Write,
{
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        let _ = writeln!(&self.target, "{}{}", self.prefix, record.args());
    }

    fn flush(&self) {
        let _ = (&self.target).flush();
    }
}

impl SimpleLogger<std::io::Stderr> {
    pub fn to_stderr(prefix: &'static str) -> SimpleLogger<std::io::Stderr> {
        SimpleLogger {
            target: std::io::stderr(),
            prefix,
        }
    }
}

/// Install the stderr logger: warnings by default, everything down to debug with `debug`.
pub fn init(debug: bool) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(SimpleLogger::to_stderr("vena: ")))?;
    log::set_max_level(if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
    Ok(())
}

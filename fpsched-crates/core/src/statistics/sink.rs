//! The process-wide destination of statistic lines.
use std::fmt::Display;
use std::io::Write;
use std::sync::Mutex;
use std::sync::OnceLock;

use convert_case::Case;
use convert_case::Casing;

struct StatisticSink {
    line_prefix: &'static str,
    closing_line: Option<&'static str>,
    casing: Option<Case>,
    writer: Box<dyn Write + Send + Sync>,
}

static SINK: OnceLock<Mutex<StatisticSink>> = OnceLock::new();

/// Enables statistic logging. Every statistic becomes a line `{prefix} {name}={value}`, with the
/// name converted to `casing` if one is given, and every block of statistics ends with `after`.
/// Lines go to `writer`, or to stdout without one.
///
/// Only the first call has an effect.
pub fn configure_statistic_logging(
    prefix: &'static str,
    after: Option<&'static str>,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send + Sync>>,
) {
    let _ = SINK.get_or_init(|| {
        Mutex::new(StatisticSink {
            line_prefix: prefix,
            closing_line: after,
            casing,
            writer: writer.unwrap_or_else(|| Box::new(std::io::stdout())),
        })
    });
}

pub(crate) fn is_statistic_logging_enabled() -> bool {
    SINK.get().is_some()
}

/// Runs `write` on the sink; does nothing if logging is not configured.
fn with_sink(write: impl FnOnce(&mut StatisticSink)) {
    if let Some(Ok(mut sink)) = SINK.get().map(Mutex::lock) {
        write(&mut sink);
    }
}

pub(super) fn write_statistic(name: impl Display, value: impl Display) {
    with_sink(|sink| {
        let name = match sink.casing {
            Some(casing) => name.to_string().to_case(casing),
            None => name.to_string(),
        };
        let _ = writeln!(sink.writer, "{} {name}={value}", sink.line_prefix);
    });
}

/// Ends a block of statistics.
pub(crate) fn write_closing_line() {
    with_sink(|sink| {
        if let Some(closing_line) = sink.closing_line {
            let _ = writeln!(sink.writer, "{closing_line}");
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::statistics::StatisticLogger;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .expect("not poisoned")
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    // The only test in this crate which configures the sink.
    #[test]
    fn names_are_cased_and_blocks_are_closed() {
        let buffer = SharedBuffer::default();
        configure_statistic_logging(
            "%%",
            Some("=========="),
            Some(Case::Snake),
            Some(Box::new(buffer.clone())),
        );
        assert!(is_statistic_logging_enabled());

        StatisticLogger::new(["Engine"]).counter("numRestores", 3);
        write_closing_line();

        let output = String::from_utf8(buffer.0.lock().expect("not poisoned").clone())
            .expect("statistics are written as text");
        assert_eq!(output, "%% engine_num_restores=3\n==========\n");
    }
}

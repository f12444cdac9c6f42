//! Record formatting shared by the file and console sinks.
//!
//! Layout is fixed for compatibility with the existing log tooling:
//!
//! ```text
//! 2024-01-15 09:30:00 - INFO    - [ 42]:crawler - fetched 200 items
//! ```
//!
//! Timestamp to the second, severity left-padded to width 7, callsite line
//! right-aligned to width 3, then the event target and message.

use std::fmt;

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Local wall-clock timestamps, `YYYY-MM-DD HH:MM:SS`.
#[derive(Debug, Clone, Default)]
pub struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// The spider's record format, generic over the timestamp source so tests
/// can pin the clock.
#[derive(Debug, Clone)]
pub struct RecordFormat<T = LocalTime> {
    timer: T,
}

impl<T> RecordFormat<T> {
    pub fn with_timer(timer: T) -> Self {
        Self { timer }
    }
}

impl<S, N, T> FormatEvent<S, N> for RecordFormat<T>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    T: FormatTime,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        self.timer.format_time(&mut writer)?;
        write!(
            writer,
            " - {:<7} - [{:>3}]:{} - ",
            metadata.level().as_str(),
            metadata.line().unwrap_or(0),
            metadata.target(),
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

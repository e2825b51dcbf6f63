use anyhow::Context;

use serde::Deserialize;

use tracing::{subscriber::set_global_default, Subscriber};

use tracing_log::LogTracer;

use tracing_subscriber::fmt::{self, format::FmtSpan, MakeWriter};
use tracing_subscriber::EnvFilter;

/// Line format of the log output
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, one event per line with span context
    #[default]
    Full,
    /// Shorter human readable lines, for interactive runs
    Compact,
    /// Newline-delimited JSON, for log collectors
    Json,
}

/// Build a formatting subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Span close events,
/// with their timings, are only emitted in the JSON format.
pub fn get_subscriber<Sink>(
    default_filter: &str,
    format: LogFormat,
    sink: Sink,
) -> Box<dyn Subscriber + Send + Sync>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = fmt::fmt().with_env_filter(env_filter).with_writer(sink);

    match format {
        LogFormat::Full => Box::new(builder.finish()),
        LogFormat::Compact => Box::new(builder.compact().with_target(false).finish()),
        LogFormat::Json => Box::new(
            builder
                .json()
                .with_current_span(true)
                .with_span_events(FmtSpan::CLOSE)
                .finish(),
        ),
    }
}

/// Install the subscriber globally and route `log` records through it
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> anyhow::Result<()> {
    LogTracer::init().context("Failed to initialize logging")?;

    set_global_default(subscriber).context("Failed to set global subscriber")
}

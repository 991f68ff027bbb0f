//! Formatting layer and filters for the advisor's own crates.
//!
//! The binary composes [`layer`] with a global `EnvFilter` so that events
//! from this workspace are rendered compactly with RFC3339 timestamps.
//! Verbosity follows `RUST_LOG` when set, else a per-crate default.

use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Targets (crate names) that belong to this workspace.
pub const WORKSPACE_TARGETS: [&str; 4] = [
    "ai_llm_service",
    "repair_advisor",
    "api",
    "pcb_advisor_backend",
];

/// RFC3339 UTC timer, e.g. `2025-09-12T10:20:30Z`.
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let s = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// True when `target` originates from one of [`WORKSPACE_TARGETS`].
pub fn is_workspace_target(target: &str) -> bool {
    WORKSPACE_TARGETS.iter().any(|prefix| {
        target == *prefix
            || target
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with("::"))
    })
}

/// Compact, single-line layer that renders ONLY workspace events.
///
/// Span close events are emitted so `#[instrument]`ed handlers log their
/// duration. ANSI colors only when stdout is a terminal.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();
    let only_workspace = filter::filter_fn(|meta| is_workspace_target(meta.target()));

    fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(false))
        .with_filter(only_workspace)
}

/// `EnvFilter` from `RUST_LOG` when it is set and valid.
///
/// Otherwise `default`, with every workspace crate raised to `level`.
/// An explicit `RUST_LOG` is never overridden per crate.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(rust_log.as_deref(), default, level)
}

fn filter_from(rust_log: Option<&str>, default: &str, level: Level) -> EnvFilter {
    if let Some(filter) = rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
    {
        return filter;
    }
    WORKSPACE_TARGETS
        .iter()
        .filter_map(|target| level_directive(target, level))
        .fold(EnvFilter::new(default), EnvFilter::add_directive)
}

fn level_directive(target: &str, level: Level) -> Option<Directive> {
    Directive::from_str(&format!("{target}={}", level.as_str().to_lowercase())).ok()
}

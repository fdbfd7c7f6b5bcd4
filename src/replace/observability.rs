use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ReplaceError;
use crate::types::DataType;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReplaceSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal, the call still succeeds).
    Warning,
    /// Error-level event (the call failed).
    Error,
}

/// Context about a replacement attempt.
#[derive(Debug, Clone)]
pub struct ReplaceContext {
    /// Name of the series being filled.
    pub column: String,
    /// Declared kind of the series.
    pub data_type: DataType,
}

/// Non-fatal conditions raised while a replacement call proceeds.
///
/// Advisories never abort the call; they describe slots the call could not
/// fill or side effects (level growth) the caller may want to know about.
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    /// The generator ran over a series whose every slot is missing.
    GeneratorAllMissing { missing: usize },
    /// The replacement carries no usable value for any missing slot; the
    /// series is returned unchanged.
    ReplacementAllMissing { positions: usize },
    /// Some missing slots were filled, the rest stay missing because their
    /// replacement values are themselves missing.
    ReplacementPartiallyMissing { filled: usize, left_missing: usize },
    /// Some replacement values could not be represented in the series kind
    /// and were dropped.
    PartialCoercion { coerced: usize, failed: usize },
    /// New labels were appended to a categorical level set.
    LevelsAdded { levels: Vec<String> },
}

impl Advisory {
    /// Severity this advisory is reported at.
    pub fn severity(&self) -> ReplaceSeverity {
        match self {
            Advisory::LevelsAdded { .. } => ReplaceSeverity::Info,
            _ => ReplaceSeverity::Warning,
        }
    }

    /// Whether the advisory is delivered only when `verbose` is set.
    pub fn verbose_only(&self) -> bool {
        matches!(self, Advisory::LevelsAdded { .. })
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::GeneratorAllMissing { missing } => {
                write!(f, "generator invoked on a series with all {missing} values missing")
            }
            Advisory::ReplacementAllMissing { positions } => {
                write!(
                    f,
                    "replacement supplies no value for any of the {positions} missing slots; series unchanged"
                )
            }
            Advisory::ReplacementPartiallyMissing { filled, left_missing } => {
                write!(f, "replacement filled {filled} slots and left {left_missing} missing")
            }
            Advisory::PartialCoercion { coerced, failed } => {
                write!(
                    f,
                    "coerced {coerced} replacement values; {failed} could not be represented and were dropped"
                )
            }
            Advisory::LevelsAdded { levels } => {
                write!(f, "added levels [{}]", levels.join(", "))
            }
        }
    }
}

/// Minimal stats reported on a completed replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceStats {
    /// Length of the series.
    pub length: usize,
    /// Number of slots that were missing on entry.
    pub missing: usize,
    /// Number of slots actually filled.
    pub replaced: usize,
    /// Labels appended to the level set, empty outside categorical series.
    pub levels_added: Vec<String>,
}

/// Observer interface for replacement outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait ReplaceObserver: Send + Sync {
    /// Called for each advisory raised while a call proceeds.
    fn on_advisory(&self, _ctx: &ReplaceContext, _advisory: &Advisory) {}

    /// Called when a replacement call returns successfully.
    fn on_complete(&self, _ctx: &ReplaceContext, _stats: &ReplaceStats) {}

    /// Called when a replacement call fails.
    fn on_failure(&self, _ctx: &ReplaceContext, _severity: ReplaceSeverity, _error: &ReplaceError) {}

    /// Called when an advisory or failure meets the alert threshold.
    fn on_alert(&self, _ctx: &ReplaceContext, _severity: ReplaceSeverity, _message: &str) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ReplaceObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ReplaceObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ReplaceObserver for CompositeObserver {
    fn on_advisory(&self, ctx: &ReplaceContext, advisory: &Advisory) {
        for o in &self.observers {
            o.on_advisory(ctx, advisory);
        }
    }

    fn on_complete(&self, ctx: &ReplaceContext, stats: &ReplaceStats) {
        for o in &self.observers {
            o.on_complete(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ReplaceContext, severity: ReplaceSeverity, error: &ReplaceError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ReplaceContext, severity: ReplaceSeverity, message: &str) {
        for o in &self.observers {
            o.on_alert(ctx, severity, message);
        }
    }
}

/// Logs replacement events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ReplaceObserver for StdErrObserver {
    fn on_advisory(&self, ctx: &ReplaceContext, advisory: &Advisory) {
        eprintln!(
            "[replace][{:?}] column={} kind={:?} {}",
            advisory.severity(),
            ctx.column,
            ctx.data_type,
            advisory
        );
    }

    fn on_complete(&self, ctx: &ReplaceContext, stats: &ReplaceStats) {
        eprintln!(
            "[replace][ok] column={} kind={:?} replaced={}/{}",
            ctx.column, ctx.data_type, stats.replaced, stats.missing
        );
    }

    fn on_failure(&self, ctx: &ReplaceContext, severity: ReplaceSeverity, error: &ReplaceError) {
        eprintln!(
            "[replace][{:?}] column={} kind={:?} err={}",
            severity, ctx.column, ctx.data_type, error
        );
    }

    fn on_alert(&self, ctx: &ReplaceContext, severity: ReplaceSeverity, message: &str) {
        eprintln!(
            "[ALERT][replace][{:?}] column={} kind={:?} {}",
            severity, ctx.column, ctx.data_type, message
        );
    }
}

/// Appends replacement events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ReplaceObserver for FileObserver {
    fn on_advisory(&self, ctx: &ReplaceContext, advisory: &Advisory) {
        self.append_line(&format!(
            "{} advisory severity={:?} column={} kind={:?} {}",
            unix_ts(),
            advisory.severity(),
            ctx.column,
            ctx.data_type,
            advisory
        ));
    }

    fn on_complete(&self, ctx: &ReplaceContext, stats: &ReplaceStats) {
        self.append_line(&format!(
            "{} ok column={} kind={:?} replaced={}/{}",
            unix_ts(),
            ctx.column,
            ctx.data_type,
            stats.replaced,
            stats.missing
        ));
    }

    fn on_failure(&self, ctx: &ReplaceContext, severity: ReplaceSeverity, error: &ReplaceError) {
        self.append_line(&format!(
            "{} fail severity={:?} column={} kind={:?} err={}",
            unix_ts(),
            severity,
            ctx.column,
            ctx.data_type,
            error
        ));
    }

    fn on_alert(&self, ctx: &ReplaceContext, severity: ReplaceSeverity, message: &str) {
        self.append_line(&format!(
            "{} ALERT severity={:?} column={} kind={:?} {}",
            unix_ts(),
            severity,
            ctx.column,
            ctx.data_type,
            message
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

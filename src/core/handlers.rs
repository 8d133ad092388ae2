//! Process-level hooks feeding the logger
//!
//! Mirrors the classic "attach the logger to the runtime" helpers: a
//! panic hook that records the panic before the previous hook runs, and a
//! helper that logs an error's cause chain oldest first.

use super::error::Result;
use super::logger::Logger;
use super::severity::Severity;
use super::value::Value;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

static PANIC_HANDLER_REGISTERED: AtomicBool = AtomicBool::new(false);

/// Keeps the panic hook installed; dropping it restores the previous hook
/// and allows a new registration.
pub struct PanicHandlerGuard {
    previous: Arc<dyn Fn(&std::panic::PanicHookInfo<'_>) + Send + Sync>,
}

impl PanicHandlerGuard {
    /// Restore the previous hook now instead of at end of scope
    pub fn unregister(self) {}
}

impl Drop for PanicHandlerGuard {
    fn drop(&mut self) {
        let previous = Arc::clone(&self.previous);
        std::panic::set_hook(Box::new(move |info| previous(info)));
        PANIC_HANDLER_REGISTERED.store(false, Ordering::SeqCst);
    }
}

/// Install a panic hook that logs every panic at critical severity with
/// `file` and `line` extras, then defers to the previously installed hook.
///
/// Only one registration may be active per process; a second call returns
/// `None` until the first guard is dropped.
pub fn register_panic_handler(logger: Arc<Mutex<Logger>>) -> Option<PanicHandlerGuard> {
    if PANIC_HANDLER_REGISTERED.swap(true, Ordering::SeqCst) {
        return None;
    }

    let previous: Arc<dyn Fn(&std::panic::PanicHookInfo<'_>) + Send + Sync> =
        Arc::from(std::panic::take_hook());
    let chained = Arc::clone(&previous);

    std::panic::set_hook(Box::new(move |info| {
        let message = if let Some(text) = info.payload().downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = info.payload().downcast_ref::<String>() {
            text.clone()
        } else {
            "panic with non-string payload".to_string()
        };

        let mut extra = BTreeMap::new();
        if let Some(location) = info.location() {
            extra.insert("file".to_string(), Value::from(location.file()));
            extra.insert("line".to_string(), Value::from(i64::from(location.line())));
        }

        // try_lock: never deadlock inside a panic already holding the logger
        if let Some(mut logger) = logger.try_lock() {
            let _ = logger.log(Severity::Critical.value(), message, extra);
        }

        chained(info);
    }));

    Some(PanicHandlerGuard { previous })
}

/// Log an error and its cause chain, oldest cause first, at error
/// severity. The root cause comes out first so the log reads in the order
/// things went wrong.
pub fn log_error_chain(
    logger: &mut Logger,
    error: &(dyn std::error::Error + 'static),
) -> Result<()> {
    let mut chain = Vec::new();
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(error);
    while let Some(err) = current {
        chain.push(err.to_string());
        current = err.source();
    }

    let depth = chain.len();
    for (index, message) in chain.into_iter().rev().enumerate() {
        let mut extra = BTreeMap::new();
        extra.insert("cause".to_string(), Value::from(index as i64));
        extra.insert("of".to_string(), Value::from(depth as i64));
        logger.log(Severity::Error.value(), message, extra)?;
    }
    Ok(())
}

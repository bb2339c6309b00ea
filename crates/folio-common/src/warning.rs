//! Parser warnings with colored terminal output.
//!
//! Provides deduplication so a document that repeats the same unsupported
//! attribute on every block reports it once. The resolution core never calls
//! into this module; it returns structured errors instead. Only the upstream
//! attribute parser and the CLI report through here.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Warnings already printed, in first-seen order.
#[derive(Default)]
struct WarningLog {
    seen: HashSet<String>,
    order: Vec<String>,
}

/// Global log of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<WarningLog>> = Mutex::new(None);

/// A poisoned lock only means another thread panicked mid-insert; the set is
/// still usable for deduplication.
fn lock() -> MutexGuard<'static, Option<WarningLog>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Warn about an unsupported input (prints once per unique message).
///
/// Returns `true` when this call printed the warning, `false` when the same
/// message had already been reported.
///
/// # Example
/// ```
/// use folio_common::warning::{clear_warnings, warn_once};
///
/// clear_warnings();
/// assert!(warn_once("Parse", "unsupported unit 'ex' in space-before: 2ex"));
/// assert!(!warn_once("Parse", "unsupported unit 'ex' in space-before: 2ex"));
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let mut guard = lock();
    let log = guard.get_or_insert_with(WarningLog::default);
    if !log.seen.insert(key.clone()) {
        return false;
    }
    log.order.push(key);
    drop(guard);

    eprintln!("{YELLOW}[Folio {component}] ⚠ {message}{RESET}");
    true
}

/// Warnings reported since the last [`clear_warnings`], in first-seen order.
///
/// Each entry has the form `[component] message`.
pub fn reported_warnings() -> Vec<String> {
    lock().as_ref().map(|log| log.order.clone()).unwrap_or_default()
}

/// Clear all recorded warnings (call before processing a new document).
pub fn clear_warnings() {
    if let Some(log) = lock().as_mut() {
        log.seen.clear();
        log.order.clear();
    }
}

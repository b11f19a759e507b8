/*!
Cooperative cancellation.

On `SIGINT` a process-wide flag is set.
The generator and the enumeration drivers poll the flag at their outer loops and
return early with a best-effort partial result; no loop blocks, so the process winds
down within one configuration's worth of work.
The ordering between partial results of different workers on interrupt is undefined.
*/

use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Install the `SIGINT` handler which sets the flag.
///
/// Called once by each binary; a second installation attempt is reported and
/// otherwise ignored.
pub fn install_handler() {
    if let Err(e) = ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::Relaxed)) {
        log::warn!("interrupt handler not installed: {e}");
    }
}

/// Whether an interrupt has been requested.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::Relaxed)
}

/// Clear the flag, so a subsequent run observes a fresh state.
pub fn clear() {
    INTERRUPTED.store(false, Ordering::Relaxed);
}

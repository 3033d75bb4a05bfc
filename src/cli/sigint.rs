//! SIGINT latch so a long-running load can stop cleanly mid-stream.

use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Has SIGINT arrived since [`install`]?
#[must_use]
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::Relaxed)
}

#[cfg(unix)]
pub fn install() {
    use std::os::raw::c_int;

    unsafe extern "C" {
        fn signal(signum: c_int, handler: usize) -> usize;
    }

    const SIGINT: c_int = 2;

    extern "C" fn latch(_signum: c_int) {
        INTERRUPTED.store(true, Ordering::Relaxed);
    }

    unsafe {
        signal(SIGINT, latch as extern "C" fn(c_int) as usize);
    }
}

#[cfg(not(unix))]
pub fn install() {}

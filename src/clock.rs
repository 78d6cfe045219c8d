//! Core clock registry
//!
//! The core clock depends on the board and on the clock tree setup, which happens outside of
//! this crate. The frequency is registered here once so the busy-wait
//! [`CycleDelay`](crate::delay::CycleDelay) can convert microseconds into cycles.
use crate::time::Hertz;
use cortex_m::interrupt::{self, Mutex};
use once_cell::unsync::OnceCell;

static SYS_CLOCK: Mutex<OnceCell<Hertz>> = Mutex::new(OnceCell::new());

/// Register the core clock frequency. The clock can be set exactly once, later calls are
/// ignored
pub fn set_sys_clock(freq: impl Into<Hertz>) {
    let freq = freq.into();
    interrupt::free(|cs| {
        SYS_CLOCK.borrow(cs).set(freq).ok();
    })
}

/// Returns the configured core clock
pub fn get_sys_clock() -> Option<Hertz> {
    interrupt::free(|cs| SYS_CLOCK.borrow(cs).get().copied())
}

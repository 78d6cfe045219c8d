//! Busy-wait delay provider
//!
//! [`GpioAccessor`](crate::gpio::GpioAccessor) waits a short settling time before every
//! register write. Any [`DelayUs<u32>`] implementation can be used for this, for example a
//! hardware timer based delay. [`CycleDelay`] is the default choice and simply spins the core
//! for the required number of clock cycles.
use crate::{clock::get_sys_clock, time::Hertz};
use embedded_hal::blocking::delay::DelayUs;

/// Delay provider spinning the core with [`cortex_m::asm::delay`]
///
/// The delay is at least as long as requested. Interrupts which fire during the delay extend it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleDelay {
    cycles_per_us: u32,
}

impl CycleDelay {
    pub fn new(sys_clk: impl Into<Hertz>) -> Self {
        CycleDelay {
            cycles_per_us: sys_clk.into().cycles_per_us(),
        }
    }

    /// Create a delay from the clock registered with
    /// [`set_sys_clock`](crate::clock::set_sys_clock). Returns [`None`] if no clock was set
    pub fn from_sys_clock() -> Option<Self> {
        get_sys_clock().map(|clk| Self::new(clk))
    }

    /// Number of core cycles spent for a delay of `us` microseconds
    #[inline]
    pub fn cycles_for(&self, us: u32) -> u64 {
        us as u64 * self.cycles_per_us as u64
    }
}

impl DelayUs<u32> for CycleDelay {
    fn delay_us(&mut self, us: u32) {
        let mut remaining = self.cycles_for(us);
        // asm::delay only takes 32 bit cycle counts
        while remaining > 0 {
            let chunk = remaining.min(u32::MAX as u64) as u32;
            cortex_m::asm::delay(chunk);
            remaining -= chunk as u64;
        }
    }
}

impl DelayUs<u16> for CycleDelay {
    #[inline]
    fn delay_us(&mut self, us: u16) {
        DelayUs::<u32>::delay_us(self, us as u32)
    }
}

impl DelayUs<u8> for CycleDelay {
    #[inline]
    fn delay_us(&mut self, us: u8) {
        DelayUs::<u32>::delay_us(self, us as u32)
    }
}

//! Time units
//!
//! See [`Hertz`] and [`MegaHertz`] for frequencies and [`MicroSeconds`] for durations.
//!
//! The [`U32Ext`] trait adds the methods `.hz()`, `.mhz()` and `.us()` to the `u32` primitive
//! type, allowing it to be converted into these units.

/// Hertz
///
/// Create a frequency specified in [Hertz](https://en.wikipedia.org/wiki/Hertz).
///
/// # Examples
///
/// ## Create a 16 MHz core clock frequency
///
/// ```rust
/// use bsrr_gpio::prelude::*;
/// use bsrr_gpio::time::Hertz;
///
/// let freq: Hertz = 16_u32.mhz().into();
/// assert_eq!(freq, Hertz(16_000_000));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Debug)]
pub struct Hertz(pub u32);

/// Megahertz
///
/// Core clocks are usually given in megahertz, so this is the unit most users will pass to
/// [`set_sys_clock`](crate::clock::set_sys_clock).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Debug)]
pub struct MegaHertz(pub u32);

/// Time unit used by the settling delay
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Debug)]
pub struct MicroSeconds(pub u32);

/// Extension trait that adds convenience methods to the `u32` type
pub trait U32Ext {
    /// Wrap in `Hertz`
    fn hz(self) -> Hertz;

    /// Wrap in `MegaHertz`
    fn mhz(self) -> MegaHertz;

    /// Wrap in `MicroSeconds`
    fn us(self) -> MicroSeconds;
}

impl U32Ext for u32 {
    fn hz(self) -> Hertz {
        Hertz(self)
    }

    fn mhz(self) -> MegaHertz {
        MegaHertz(self)
    }

    fn us(self) -> MicroSeconds {
        MicroSeconds(self)
    }
}

impl From<MegaHertz> for Hertz {
    fn from(val: MegaHertz) -> Self {
        Self(val.0 * 1_000_000)
    }
}

impl Hertz {
    /// Number of core clock cycles which fit into one microsecond, rounded up.
    ///
    /// Never returns 0, so a delay derived from it always spins at least once per microsecond
    /// even for clocks below 1 MHz.
    pub const fn cycles_per_us(self) -> u32 {
        let cycles = self.0 / 1_000_000 + (self.0 % 1_000_000 != 0) as u32;
        if cycles == 0 {
            1
        } else {
            cycles
        }
    }
}

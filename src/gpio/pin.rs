//! # Single pin bound to a port
//!
//! [`Pin`] pairs a port, a [`PinMask`] and a [`GpioAccessor`] so a pin can be handed to drivers
//! written against the embedded HAL GPIO traits, namely: [`InputPin`], [`OutputPin`],
//! [`StatefulOutputPin`] and [`ToggleableOutputPin`]. None of the operations can fail, so all
//! traits use `Error = core::convert::Infallible`.
//!
//! ```no_run
//! use bsrr_gpio::delay::CycleDelay;
//! use bsrr_gpio::gpio::{GpioAccessor, RegisterBlock, PIN_5};
//! use bsrr_gpio::prelude::*;
//!
//! let gpioa = unsafe { RegisterBlock::from_addr(0x4002_0000) };
//! let gpio = GpioAccessor::new(CycleDelay::new(16_u32.mhz()));
//! let mut led = gpio.into_pin(gpioa, PIN_5);
//! led.set_high().ok();
//! ```
use super::{
    accessor::GpioAccessor,
    pins::{PinMask, PinState},
    reg::PortRegisters,
};
use core::convert::Infallible;
use core::fmt;
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::{InputPin, OutputPin, StatefulOutputPin, ToggleableOutputPin};

/// A single pin of a port, bound to its own [`GpioAccessor`]
///
/// Created with [`GpioAccessor::into_pin`] or [`Pin::new`]. The port is only borrowed, so several
/// pins of the same port can exist at the same time. Toggling the same pin through more than one
/// [`Pin`] from different contexts is subject to the race described for
/// [`GpioAccessor::toggle`].
pub struct Pin<'p, R: PortRegisters + ?Sized, D> {
    port: &'p R,
    mask: PinMask,
    gpio: GpioAccessor<D>,
}

impl<'p, R: PortRegisters + ?Sized, D: DelayUs<u32>> Pin<'p, R, D> {
    pub fn new(port: &'p R, mask: PinMask, gpio: GpioAccessor<D>) -> Self {
        Pin { port, mask, gpio }
    }

    #[inline]
    pub fn mask(&self) -> PinMask {
        self.mask
    }

    #[inline]
    pub fn port(&self) -> &'p R {
        self.port
    }

    /// Consumes the pin and returns the accessor
    pub fn release(self) -> GpioAccessor<D> {
        self.gpio
    }

    #[inline]
    pub fn write(&mut self, state: PinState) {
        self.gpio.write(self.port, self.mask, state)
    }

    #[inline]
    pub fn read(&self) -> PinState {
        self.gpio.read(self.port, self.mask)
    }
}

// The port is left out because register blocks are not required to implement Debug
impl<R: PortRegisters + ?Sized, D: fmt::Debug> fmt::Debug for Pin<'_, R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pin")
            .field("mask", &self.mask)
            .field("gpio", &self.gpio)
            .finish_non_exhaustive()
    }
}

//==================================================================================================
//  Embedded HAL traits
//==================================================================================================

impl<'p, R: PortRegisters + ?Sized, D: DelayUs<u32>> OutputPin for Pin<'p, R, D> {
    type Error = Infallible;

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.gpio.set(self.port, self.mask);
        Ok(())
    }

    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.gpio.reset(self.port, self.mask);
        Ok(())
    }
}

impl<'p, R: PortRegisters + ?Sized, D: DelayUs<u32>> StatefulOutputPin for Pin<'p, R, D> {
    #[inline]
    fn is_set_high(&self) -> Result<bool, Infallible> {
        Ok(self.gpio.is_set_high(self.port, self.mask))
    }

    #[inline]
    fn is_set_low(&self) -> Result<bool, Infallible> {
        Ok(self.gpio.is_set_low(self.port, self.mask))
    }
}

impl<'p, R: PortRegisters + ?Sized, D: DelayUs<u32>> ToggleableOutputPin for Pin<'p, R, D> {
    type Error = Infallible;

    #[inline]
    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.gpio.toggle(self.port, self.mask);
        Ok(())
    }
}

impl<'p, R: PortRegisters + ?Sized, D: DelayUs<u32>> InputPin for Pin<'p, R, D> {
    type Error = Infallible;

    #[inline]
    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.read() == PinState::High)
    }

    #[inline]
    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(self.read() == PinState::Low)
    }
}

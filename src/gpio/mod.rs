//! # GPIO module
//!
//! Direct register access for GPIO ports with a bit set/reset register (BSRR). The API is split
//! into the following parts:
//!
//! - [`PortRegisters`] abstracts the three registers of a port which are needed to drive and
//!   sample pins. [`RegisterBlock`] implements it for the common STM32 port layout and
//!   [`SimPort`] implements it in memory for host-side tests.
//! - [`GpioAccessor`] provides the pin operations set, reset, toggle, write and read.
//! - [`PinMask`] selects pins, [`PinState`] is the logical level of a pin.
//! - [`MaskCheck`] and [`GpioConfig`] select how invalid pin masks are handled.
//! - [`Pin`] binds a single pin to a port for use with the embedded HAL traits.
//!
//! Pin mode, pull, alternate function and interrupt configuration as well as clock gating are
//! expected to be done before the pins are used with this module.
//!
//! ## Examples
//!
//! ```
//! use bsrr_gpio::gpio::{GpioAccessor, PinState, SimPort, PIN_5};
//! # struct NoDelay;
//! # impl embedded_hal::blocking::delay::DelayUs<u32> for NoDelay {
//! #     fn delay_us(&mut self, _us: u32) {}
//! # }
//!
//! let port = SimPort::new(0x0000, 0x0020);
//! let mut gpio = GpioAccessor::new(NoDelay);
//! gpio.set(&port, PIN_5);
//! assert_eq!(port.output(), 0x0020);
//! gpio.toggle(&port, PIN_5);
//! assert_eq!(port.output(), 0x0000);
//! assert_eq!(gpio.read(&port, PIN_5), PinState::High);
//! ```
pub mod accessor;
pub use accessor::*;

pub mod check;
pub use check::*;

pub mod pin;
pub use pin::*;

pub mod pins;
pub use pins::*;

pub mod reg;
pub use reg::*;

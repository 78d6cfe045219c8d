#![no_std]

pub mod clock;
pub mod delay;
pub mod gpio;
pub mod prelude;
pub mod time;

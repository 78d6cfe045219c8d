//! # Pin masks and logical pin states
//!
//! A [`PinMask`] selects pins within the 16 pin namespace of a port. The intended use is a
//! one-hot mask selecting exactly one pin, as provided by the [`PIN_0`] to [`PIN_15`] constants.
//! Multi-bit masks can still be built with [`PinMask::from_bits`] or by combining constants with
//! `|`. Set and reset handle them fine, but [`read`](super::GpioAccessor::read) reports
//! [`PinState::High`] if *any* selected pin is high.
//!
//! [`PinMask::new`] and [`PinMask::pin`] are the strict constructors which only accept a single
//! pin and report anything else as a [`MaskError`].
use core::ops::{BitOr, Not};
use embedded_hal::digital::v2 as hal;
use paste::paste;

//==================================================================================================
//  Errors and Definitions
//==================================================================================================

/// Errors returned by the strict [`PinMask`] constructors
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MaskError {
    /// No pin was selected
    Empty,
    /// More than one pin was selected
    MultiplePins,
    /// The pin number is outside of the 16 pin namespace of a port
    PinOutOfRange,
}

/// Logical level of a pin
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PinState {
    Low = 0,
    High = 1,
}

impl From<bool> for PinState {
    #[inline]
    fn from(high: bool) -> Self {
        if high {
            PinState::High
        } else {
            PinState::Low
        }
    }
}

impl From<PinState> for bool {
    #[inline]
    fn from(state: PinState) -> Self {
        state == PinState::High
    }
}

impl Not for PinState {
    type Output = PinState;

    #[inline]
    fn not(self) -> Self::Output {
        match self {
            PinState::Low => PinState::High,
            PinState::High => PinState::Low,
        }
    }
}

impl From<PinState> for hal::PinState {
    #[inline]
    fn from(state: PinState) -> Self {
        match state {
            PinState::Low => hal::PinState::Low,
            PinState::High => hal::PinState::High,
        }
    }
}

impl From<hal::PinState> for PinState {
    #[inline]
    fn from(state: hal::PinState) -> Self {
        match state {
            hal::PinState::Low => PinState::Low,
            hal::PinState::High => PinState::High,
        }
    }
}

//==================================================================================================
//  PinMask
//==================================================================================================

/// Bit mask selecting pins of a port. Bit `n` selects pin `n`
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct PinMask(u16);

impl PinMask {
    /// Number of pins of a port
    pub const NUM_PINS: u8 = 16;

    /// Create a mask from raw bits without any checks. Multi-bit and empty masks are accepted
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        PinMask(bits)
    }

    /// Create a mask which selects exactly one pin
    pub const fn new(bits: u16) -> Result<Self, MaskError> {
        match bits.count_ones() {
            0 => Err(MaskError::Empty),
            1 => Ok(PinMask(bits)),
            _ => Err(MaskError::MultiplePins),
        }
    }

    /// Create the mask for pin number `num`
    pub const fn pin(num: u8) -> Result<Self, MaskError> {
        if num >= Self::NUM_PINS {
            return Err(MaskError::PinOutOfRange);
        }
        Ok(PinMask(1 << num))
    }

    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Mask widened to the 32 bit register width
    #[inline]
    pub const fn bits_32(self) -> u32 {
        self.0 as u32
    }

    /// A mask is valid if it selects at least one pin of the port
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Returns true if exactly one pin is selected
    #[inline]
    pub const fn is_single(self) -> bool {
        self.0.count_ones() == 1
    }

    /// Pin number of a single pin mask
    pub const fn pin_num(self) -> Option<u8> {
        if self.is_single() {
            Some(self.0.trailing_zeros() as u8)
        } else {
            None
        }
    }
}

impl BitOr for PinMask {
    type Output = PinMask;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        PinMask(self.0 | rhs.0)
    }
}

impl From<PinMask> for u16 {
    #[inline]
    fn from(mask: PinMask) -> Self {
        mask.0
    }
}

impl TryFrom<u16> for PinMask {
    type Error = MaskError;

    #[inline]
    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        PinMask::new(bits)
    }
}

macro_rules! pin_masks {
    ($($NUM:literal),+ $(,)?) => {
        // Need paste macro to build the constant names and docs
        paste! {
            $(
                #[doc = "Mask selecting pin " $NUM " of a port"]
                pub const [<PIN_ $NUM>]: PinMask = PinMask(1 << $NUM);
            )+
        }
    };
}

pin_masks!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15);

/// Mask selecting all pins of a port
pub const PIN_ALL: PinMask = PinMask(0xFFFF);

//! # Pin mask validation
//!
//! Every register operation validates its [`PinMask`] before touching the hardware. What happens
//! on an invalid mask is selected with [`MaskCheck`]:
//!
//! - The build default follows `debug_assertions`: debug builds panic, release builds skip the
//!   check entirely.
//! - The `strict-mask` feature forces [`MaskCheck::Panic`] and the `unchecked-mask` feature
//!   forces [`MaskCheck::Off`]. `strict-mask` wins if both are enabled.
//! - At startup, a [`GpioConfig`] passed to
//!   [`GpioAccessor::with_config`](super::GpioAccessor::with_config) overrides the build default.
use super::pins::PinMask;
use crate::time::MicroSeconds;

/// Strategy applied to an invalid pin mask
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MaskCheck {
    /// Panic with the offending mask
    Panic,
    /// Skip the check. An invalid mask is written to the registers as-is
    Off,
}

impl MaskCheck {
    /// Strategy selected by the crate features and the build profile
    pub const BUILD_DEFAULT: MaskCheck = if cfg!(feature = "strict-mask") {
        MaskCheck::Panic
    } else if cfg!(feature = "unchecked-mask") {
        MaskCheck::Off
    } else if cfg!(debug_assertions) {
        MaskCheck::Panic
    } else {
        MaskCheck::Off
    };

    #[inline(always)]
    pub fn validate(self, mask: PinMask) {
        if self == MaskCheck::Panic && !mask.is_valid() {
            panic!("invalid GPIO pin mask {:#06x}", mask.bits());
        }
    }
}

impl Default for MaskCheck {
    #[inline]
    fn default() -> Self {
        Self::BUILD_DEFAULT
    }
}

/// Startup configuration of a [`GpioAccessor`](super::GpioAccessor)
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct GpioConfig {
    pub mask_check: MaskCheck,
    /// Settling delay which precedes every register write. 0 disables it
    pub settle: MicroSeconds,
}

impl GpioConfig {
    /// Default settling delay before each register write
    pub const DEFAULT_SETTLE: MicroSeconds = MicroSeconds(1);

    pub fn new(mask_check: MaskCheck, settle: impl Into<MicroSeconds>) -> Self {
        GpioConfig {
            mask_check,
            settle: settle.into(),
        }
    }

    pub fn mask_check(mut self, mask_check: MaskCheck) -> Self {
        self.mask_check = mask_check;
        self
    }

    pub fn settle(mut self, settle: impl Into<MicroSeconds>) -> Self {
        self.settle = settle.into();
        self
    }
}

impl Default for GpioConfig {
    fn default() -> Self {
        GpioConfig::new(MaskCheck::BUILD_DEFAULT, Self::DEFAULT_SETTLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::PIN_3;
    use crate::time::U32Ext;

    #[test]
    fn valid_mask_passes_both_strategies() {
        MaskCheck::Panic.validate(PIN_3);
        MaskCheck::Off.validate(PIN_3);
    }

    #[test]
    #[should_panic(expected = "invalid GPIO pin mask 0x0000")]
    fn empty_mask_panics() {
        MaskCheck::Panic.validate(PinMask::from_bits(0));
    }

    #[test]
    fn empty_mask_ignored_when_off() {
        MaskCheck::Off.validate(PinMask::from_bits(0));
    }

    #[test]
    fn default_config() {
        let cfg = GpioConfig::default();
        assert_eq!(cfg.mask_check, MaskCheck::BUILD_DEFAULT);
        assert_eq!(cfg.settle, 1_u32.us());
    }

    #[test]
    #[cfg(all(debug_assertions, not(feature = "unchecked-mask")))]
    fn debug_builds_panic_by_default() {
        assert_eq!(MaskCheck::default(), MaskCheck::Panic);
    }

    #[test]
    fn config_builder() {
        let cfg = GpioConfig::default()
            .mask_check(MaskCheck::Off)
            .settle(5_u32.us());
        assert_eq!(cfg, GpioConfig::new(MaskCheck::Off, MicroSeconds(5)));
    }
}

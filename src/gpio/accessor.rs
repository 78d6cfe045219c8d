//! # Pin operations on a port
//!
//! [`GpioAccessor`] translates logical pin operations into register accesses on any
//! [`PortRegisters`] implementation. Set and reset go through the bit set/reset register with a
//! single store, so they can be used from interrupt handlers and the main thread at the same time
//! as long as they work on different pins.
//!
//! [`GpioAccessor::toggle`] is different. It has to read the output data register to find out
//! which half of the bit set/reset register to use. A write to the same pin from another context
//! between the read and the write is lost. Callers toggling the same pin from several contexts
//! must serialize these calls themselves, for example with
//! [`cortex_m::interrupt::free`].
//!
//! Each write is preceded by a short settling delay, 1 µs by default. Peripherals driven by the
//! pins may need this after a preceding operation.
use super::{
    check::GpioConfig,
    pin::Pin,
    pins::{PinMask, PinState},
    reg::PortRegisters,
};
use crate::time::MicroSeconds;
use embedded_hal::blocking::delay::DelayUs;

/// Stateless pin operations on GPIO ports
///
/// The accessor only owns the delay provider and its [`GpioConfig`]. Ports are borrowed for the
/// duration of a single call, so one accessor can serve all ports of a device.
#[derive(Debug)]
pub struct GpioAccessor<D> {
    delay: D,
    config: GpioConfig,
}

impl<D: DelayUs<u32>> GpioAccessor<D> {
    /// Create an accessor with the default [`GpioConfig`]
    pub fn new(delay: D) -> Self {
        Self::with_config(delay, GpioConfig::default())
    }

    pub fn with_config(delay: D, config: GpioConfig) -> Self {
        GpioAccessor { delay, config }
    }

    #[inline]
    pub fn config(&self) -> GpioConfig {
        self.config
    }

    /// Consumes the accessor and returns the delay provider
    pub fn release(self) -> D {
        self.delay
    }

    /// Bind the accessor to a single pin of `port`
    pub fn into_pin<R: PortRegisters + ?Sized>(self, port: &R, mask: PinMask) -> Pin<'_, R, D> {
        Pin::new(port, mask, self)
    }

    #[inline]
    fn settle(&mut self) {
        let MicroSeconds(us) = self.config.settle;
        if us > 0 {
            self.delay.delay_us(us);
        }
    }

    /// Drive the pins in `mask` high
    #[inline]
    pub fn set<R: PortRegisters + ?Sized>(&mut self, port: &R, mask: PinMask) {
        self.config.mask_check.validate(mask);
        self.settle();
        port.apply_atomic_bit_op(mask.bits(), 0);
    }

    /// Drive the pins in `mask` low
    #[inline]
    pub fn reset<R: PortRegisters + ?Sized>(&mut self, port: &R, mask: PinMask) {
        self.config.mask_check.validate(mask);
        self.settle();
        port.apply_atomic_bit_op(0, mask.bits());
    }

    /// Invert the output level of the pins in `mask`
    ///
    /// Pins which are currently set are cleared and vice versa, with a single write to the bit
    /// set/reset register. The preceding read of the output data register is not atomic with the
    /// write, see the [module documentation](self).
    #[inline]
    pub fn toggle<R: PortRegisters + ?Sized>(&mut self, port: &R, mask: PinMask) {
        self.config.mask_check.validate(mask);
        let current = port.read_output();
        self.settle();
        let mask = mask.bits_32();
        port.apply_atomic_bit_op((!current & mask) as u16, (current & mask) as u16);
    }

    /// Drive the pins in `mask` to `state`
    #[inline]
    pub fn write<R: PortRegisters + ?Sized>(&mut self, port: &R, mask: PinMask, state: PinState) {
        match state {
            PinState::High => self.set(port, mask),
            PinState::Low => self.reset(port, mask),
        }
    }

    /// Sample the live level of the pins in `mask`
    ///
    /// Returns [`PinState::High`] if any of the selected pins is high. Only a single pin mask
    /// gives a per-pin answer.
    #[inline]
    pub fn read<R: PortRegisters + ?Sized>(&self, port: &R, mask: PinMask) -> PinState {
        self.config.mask_check.validate(mask);
        PinState::from(port.read_input() & mask.bits_32() != 0)
    }

    /// Returns true if any of the pins in `mask` is latched high in the output data register
    #[inline]
    pub fn is_set_high<R: PortRegisters + ?Sized>(&self, port: &R, mask: PinMask) -> bool {
        self.config.mask_check.validate(mask);
        port.read_output() & mask.bits_32() != 0
    }

    /// Returns true if none of the pins in `mask` is latched high in the output data register
    #[inline]
    pub fn is_set_low<R: PortRegisters + ?Sized>(&self, port: &R, mask: PinMask) -> bool {
        !self.is_set_high(port, mask)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::gpio::{check::MaskCheck, reg::SimPort, PIN_5, PIN_ALL};
    use crate::time::U32Ext;

    /// Delay provider recording the requested delays instead of waiting
    #[derive(Default)]
    pub(crate) struct RecordingDelay {
        pub calls: usize,
        pub total_us: u64,
    }

    impl DelayUs<u32> for RecordingDelay {
        fn delay_us(&mut self, us: u32) {
            self.calls += 1;
            self.total_us += us as u64;
        }
    }

    /// Delay provider snapshotting the port when it is called
    ///
    /// `seen` holds the number of BSRR writes and the ODR value at the time of the last delay.
    /// `interfere` pins are set during the delay, standing in for another context writing the
    /// port while the accessor waits.
    struct PortWatchDelay<'a> {
        port: &'a SimPort,
        seen: Option<(usize, u32)>,
        interfere: u16,
    }

    impl DelayUs<u32> for PortWatchDelay<'_> {
        fn delay_us(&mut self, _us: u32) {
            self.seen = Some((self.port.set_reset_writes(), self.port.output()));
            if self.interfere != 0 {
                self.port.apply_atomic_bit_op(self.interfere, 0);
            }
        }
    }

    fn watched(port: &SimPort) -> GpioAccessor<PortWatchDelay<'_>> {
        let delay = PortWatchDelay {
            port,
            seen: None,
            interfere: 0,
        };
        GpioAccessor::with_config(delay, GpioConfig::new(MaskCheck::Panic, 1_u32.us()))
    }

    const INITIAL_STATES: [u32; 6] = [0x0000, 0xFFFF, 0xAAAA, 0x5555, 0x0F0F, 0x1234];

    fn accessor() -> GpioAccessor<RecordingDelay> {
        GpioAccessor::with_config(
            RecordingDelay::default(),
            GpioConfig::new(MaskCheck::Panic, 1_u32.us()),
        )
    }

    fn single_pins() -> impl Iterator<Item = PinMask> {
        (0..PinMask::NUM_PINS).map(|n| PinMask::pin(n).unwrap())
    }

    #[test]
    fn set_changes_only_the_target_bit() {
        let mut gpio = accessor();
        for init in INITIAL_STATES {
            for mask in single_pins() {
                let port = SimPort::new(init, 0);
                gpio.set(&port, mask);
                assert_eq!(port.output(), init | mask.bits_32());
                assert_eq!(port.last_set_reset(), Some(mask.bits_32()));
            }
        }
    }

    #[test]
    fn reset_changes_only_the_target_bit() {
        let mut gpio = accessor();
        for init in INITIAL_STATES {
            for mask in single_pins() {
                let port = SimPort::new(init, 0);
                gpio.reset(&port, mask);
                assert_eq!(port.output(), init & !mask.bits_32());
                assert_eq!(port.last_set_reset(), Some(mask.bits_32() << 16));
            }
        }
    }

    #[test]
    fn toggle_flips_only_the_target_bit() {
        let mut gpio = accessor();
        for init in INITIAL_STATES {
            for mask in single_pins() {
                let port = SimPort::new(init, 0);
                gpio.toggle(&port, mask);
                assert_eq!(port.output(), init ^ mask.bits_32());
                gpio.toggle(&port, mask);
                assert_eq!(port.output(), init);
                assert_eq!(port.set_reset_writes(), 2);
            }
        }
    }

    #[test]
    fn toggle_multi_pin_mask_uses_both_halves() {
        let mut gpio = accessor();
        let port = SimPort::new(0x0001, 0);
        gpio.toggle(&port, PinMask::from_bits(0x0003));
        assert_eq!(port.last_set_reset(), Some(0x0001_0002));
        assert_eq!(port.output(), 0x0002);
    }

    #[test]
    fn write_matches_set_and_reset() {
        let mut gpio = accessor();
        for init in INITIAL_STATES {
            for mask in single_pins() {
                let written = SimPort::new(init, 0);
                let direct = SimPort::new(init, 0);
                gpio.write(&written, mask, PinState::High);
                gpio.set(&direct, mask);
                assert_eq!(written.output(), direct.output());
                assert_eq!(written.last_set_reset(), direct.last_set_reset());

                gpio.write(&written, mask, PinState::Low);
                gpio.reset(&direct, mask);
                assert_eq!(written.output(), direct.output());
                assert_eq!(written.last_set_reset(), direct.last_set_reset());
            }
        }
    }

    #[test]
    fn read_samples_input_not_output() {
        let gpio = accessor();
        for mask in single_pins() {
            let port = SimPort::new(0xFFFF, mask.bits_32());
            assert_eq!(gpio.read(&port, mask), PinState::High);
            port.set_input(!mask.bits_32());
            assert_eq!(gpio.read(&port, mask), PinState::Low);
            let port = SimPort::new(0x0000, mask.bits_32());
            assert_eq!(gpio.read(&port, mask), PinState::High);
        }
    }

    #[test]
    fn read_multi_pin_mask_is_logical_or() {
        let gpio = accessor();
        let port = SimPort::new(0, 0x0100);
        assert_eq!(gpio.read(&port, PIN_ALL), PinState::High);
        assert_eq!(gpio.read(&port, PinMask::from_bits(0x00FF)), PinState::Low);
    }

    #[test]
    fn output_latch_queries() {
        let gpio = accessor();
        let port = SimPort::new(0x0020, 0);
        assert!(gpio.is_set_high(&port, PIN_5));
        assert!(gpio.is_set_low(&port, PinMask::from_bits(0x0010)));
    }

    #[test]
    fn every_write_waits_once() {
        let mut gpio = accessor();
        let port = SimPort::default();
        gpio.set(&port, PIN_5);
        gpio.reset(&port, PIN_5);
        gpio.toggle(&port, PIN_5);
        gpio.write(&port, PIN_5, PinState::High);
        let _ = gpio.read(&port, PIN_5);
        let delay = gpio.release();
        assert_eq!(delay.calls, 4);
        assert_eq!(delay.total_us, 4);
    }

    #[test]
    fn every_write_waits_before_the_store() {
        let port = SimPort::new(0x0001, 0);
        let mut gpio = watched(&port);

        gpio.set(&port, PIN_5);
        assert_eq!(gpio.delay.seen, Some((0, 0x0001)));
        assert_eq!((port.set_reset_writes(), port.output()), (1, 0x0021));

        gpio.reset(&port, PIN_5);
        assert_eq!(gpio.delay.seen, Some((1, 0x0021)));
        assert_eq!((port.set_reset_writes(), port.output()), (2, 0x0001));

        gpio.toggle(&port, PIN_5);
        assert_eq!(gpio.delay.seen, Some((2, 0x0001)));
        assert_eq!((port.set_reset_writes(), port.output()), (3, 0x0021));

        gpio.write(&port, PIN_5, PinState::Low);
        assert_eq!(gpio.delay.seen, Some((3, 0x0021)));
        assert_eq!((port.set_reset_writes(), port.output()), (4, 0x0001));

        gpio.delay.seen = None;
        port.set_input(0x0020);
        assert_eq!(gpio.read(&port, PIN_5), PinState::High);
        assert_eq!(gpio.delay.seen, None);
    }

    #[test]
    fn toggle_samples_output_before_the_delay() {
        let port = SimPort::new(0x0000, 0);
        let mut gpio = watched(&port);
        gpio.delay.interfere = PIN_5.bits();
        gpio.toggle(&port, PIN_5);
        assert_eq!(gpio.delay.seen, Some((0, 0x0000)));
        // The level set during the delay is not seen, so the toggle sets the pin again
        assert_eq!(port.set_reset_writes(), 2);
        assert_eq!(port.last_set_reset(), Some(0x0000_0020));
        assert_eq!(port.output(), 0x0020);
    }

    #[test]
    fn settle_delay_can_be_disabled() {
        let mut gpio = GpioAccessor::with_config(
            RecordingDelay::default(),
            GpioConfig::default().settle(0_u32.us()),
        );
        let port = SimPort::default();
        gpio.set(&port, PIN_5);
        assert_eq!(port.output(), 0x0020);
        assert_eq!(gpio.release().calls, 0);
    }

    #[test]
    #[should_panic(expected = "invalid GPIO pin mask")]
    fn empty_mask_panics_before_touching_the_port() {
        let mut gpio = accessor();
        let port = SimPort::default();
        gpio.set(&port, PinMask::from_bits(0));
    }

    #[test]
    fn empty_mask_reaches_the_port_when_unchecked() {
        let mut gpio = GpioAccessor::with_config(
            RecordingDelay::default(),
            GpioConfig::new(MaskCheck::Off, 1_u32.us()),
        );
        let port = SimPort::new(0x00FF, 0);
        gpio.reset(&port, PinMask::from_bits(0));
        assert_eq!(port.last_set_reset(), Some(0));
        assert_eq!(port.output(), 0x00FF);
    }
}

//! Test image
//!
//! Runs the pin operations against the real GPIOA of a NUCLEO-F401RE board. Results are printed
//! over RTT, a failed assertion ends up in the RTT panic handler.
#![no_main]
#![no_std]

use bsrr_gpio::{
    clock::{get_sys_clock, set_sys_clock},
    delay::CycleDelay,
    gpio::{GpioAccessor, PinMask, PinState, RegisterBlock, PIN_0, PIN_1, PIN_5},
    prelude::*,
    time::Hertz,
};
use cortex_m_rt::entry;
use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};

const GPIOA: usize = 0x4002_0000;
const RCC_AHB1ENR: usize = 0x4002_3830;

#[allow(dead_code)]
#[derive(Debug)]
enum TestCase {
    // Tie PORTA[0] to PORTA[1] for these tests!
    TestBasic,
    TestToggle,
    TestWrite,
    // Leave PORTA[1] tied to PORTA[0], PORTA[2] to PORTA[4] floating
    TestMultiPinRead,
    // Should end in the panic handler in debug builds
    TestEmptyMask,
}

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("-- BSRR GPIO Test Application --");
    unsafe {
        let ahb1enr = RCC_AHB1ENR as *mut u32;
        ahb1enr.write_volatile(ahb1enr.read_volatile() | 1);
        // PA0 and PA5 output, PA1 input
        let moder = GPIOA as *mut u32;
        let mode = moder.read_volatile() & !((0b11 << 10) | (0b11 << 2) | 0b11);
        moder.write_volatile(mode | (0b01 << 10) | 0b01);
    }
    set_sys_clock(16_u32.mhz());
    // The core clock can only be registered once
    set_sys_clock(84_u32.mhz());
    assert_eq!(get_sys_clock(), Some(Hertz::from(16_u32.mhz())));
    rprintln!("Core clock registered once: {:?}", get_sys_clock());
    let delay = CycleDelay::from_sys_clock().unwrap();
    let porta = unsafe { RegisterBlock::from_addr(GPIOA) };
    let mut gpio = GpioAccessor::new(delay);
    let test_case = TestCase::TestBasic;

    match test_case {
        TestCase::TestEmptyMask => {
            rprintln!("Test case {:?}", test_case);
        }
        _ => {
            rprintln!(
                "Test case {:?}. Make sure to tie PORTA[0] to PORTA[1]",
                test_case
            );
        }
    }
    match test_case {
        TestCase::TestBasic => {
            gpio.set(porta, PIN_0);
            assert_eq!(gpio.read(porta, PIN_1), PinState::High);
            gpio.reset(porta, PIN_0);
            assert_eq!(gpio.read(porta, PIN_1), PinState::Low);
        }
        TestCase::TestToggle => {
            gpio.reset(porta, PIN_0);
            gpio.toggle(porta, PIN_0);
            assert!(gpio.is_set_high(porta, PIN_0));
            assert_eq!(gpio.read(porta, PIN_1), PinState::High);
            gpio.toggle(porta, PIN_0);
            assert!(gpio.is_set_low(porta, PIN_0));
            assert_eq!(gpio.read(porta, PIN_1), PinState::Low);
        }
        TestCase::TestWrite => {
            gpio.write(porta, PIN_0, PinState::High);
            assert_eq!(gpio.read(porta, PIN_1), PinState::High);
            gpio.write(porta, PIN_0, PinState::Low);
            assert_eq!(gpio.read(porta, PIN_1), PinState::Low);
        }
        TestCase::TestMultiPinRead => {
            gpio.set(porta, PIN_0);
            assert_eq!(
                gpio.read(porta, PinMask::from_bits(0x0002) | PinMask::from_bits(0x0010)),
                PinState::High
            );
            gpio.reset(porta, PIN_0);
        }
        TestCase::TestEmptyMask => {
            gpio.set(porta, PinMask::from_bits(0));
            rprintln!("Mask check disabled, empty mask was written");
        }
    }

    rprintln!("Test success");
    let mut led = gpio.into_pin(porta, PIN_5);
    loop {
        led.toggle().ok();
        cortex_m::asm::delay(8_000_000);
    }
}

//! Logs the input data register of GPIOA over RTT
#![no_main]
#![no_std]

use bsrr_gpio::{
    delay::CycleDelay,
    gpio::{GpioAccessor, RegisterBlock, PIN_13},
    prelude::*,
};
use cortex_m_rt::entry;
use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};

const GPIOC: usize = 0x4002_0800;
const RCC_AHB1ENR: usize = 0x4002_3830;

#[entry]
fn main() -> ! {
    rtt_init_print!();
    // User button of the NUCLEO-F401RE on PC13. The pin is an input after reset
    unsafe {
        let ahb1enr = RCC_AHB1ENR as *mut u32;
        ahb1enr.write_volatile(ahb1enr.read_volatile() | (1 << 2));
    }
    let portc = unsafe { RegisterBlock::from_addr(GPIOC) };
    let gpio = GpioAccessor::new(CycleDelay::new(16_u32.mhz()));
    let mut counter = 0;
    loop {
        rprintln!(
            "{}: IDR {:#06x}, button {:?}",
            counter,
            portc.read_input(),
            gpio.read(portc, PIN_13)
        );
        counter += 1;
        cortex_m::asm::delay(16_000_000);
    }
}

//! Simple blinky example
//!
//! Written for a NUCLEO-F401RE board with the user LED on PA5. Any part with the same GPIO
//! port layout works after adapting the port address and the board setup.
#![no_main]
#![no_std]

use bsrr_gpio::{
    clock::set_sys_clock,
    delay::CycleDelay,
    gpio::{GpioAccessor, RegisterBlock, PIN_5},
    prelude::*,
};
use cortex_m_rt::entry;
use panic_halt as _;

const GPIOA: usize = 0x4002_0000;
const RCC_AHB1ENR: usize = 0x4002_3830;

#[entry]
fn main() -> ! {
    // Port clock and pin mode belong to the board setup
    unsafe {
        let ahb1enr = RCC_AHB1ENR as *mut u32;
        ahb1enr.write_volatile(ahb1enr.read_volatile() | 1);
        let moder = GPIOA as *mut u32;
        moder.write_volatile((moder.read_volatile() & !(0b11 << 10)) | (0b01 << 10));
    }
    set_sys_clock(16_u32.mhz());
    let mut delay = CycleDelay::from_sys_clock().unwrap();
    let porta = unsafe { RegisterBlock::from_addr(GPIOA) };
    let mut gpio = GpioAccessor::new(delay);
    for _ in 0..10 {
        gpio.reset(porta, PIN_5);
        delay.delay_us(200_000_u32);
        gpio.set(porta, PIN_5);
        delay.delay_us(200_000_u32);
    }
    let mut led = gpio.into_pin(porta, PIN_5);
    loop {
        led.toggle().ok();
        delay.delay_us(200_000_u32);
    }
}

use core::cell::{Cell, UnsafeCell};
use core::ptr::{read_volatile, write_volatile};

//==================================================================================================
// Register Interface
//==================================================================================================

/// Provide register access for a GPIO port
///
/// Only three registers of a port are needed to drive and sample pins:
///
/// - the input data register (IDR), reflecting the live level on each pin
/// - the output data register (ODR), holding the latched output state
/// - the bit set/reset register (BSRR), a write-only register where a 1 in bit `n` of the lower
///   half drives pin `n` high and a 1 in bit `n` of the upper half drives pin `n` low. Bits
///   written as 0 leave the corresponding pins untouched, so no read-modify-write cycle is
///   required. If both halves select the same pin, the set half wins.
///
/// # Safety
///
/// Implementers must map [`write_set_reset`] to a register with exactly the BSRR semantics
/// described above, and the read functions must have no side effects. The
/// [`GpioAccessor`](super::GpioAccessor) relies on this to keep set and reset interrupt safe.
///
/// [`write_set_reset`]: Self::write_set_reset
pub unsafe trait PortRegisters {
    /// Read the input data register
    fn read_input(&self) -> u32;

    /// Read the output data register
    fn read_output(&self) -> u32;

    /// Write the bit set/reset register
    fn write_set_reset(&self, bits: u32);

    /// Drive the pins in `set` high and the pins in `clear` low with a single store
    #[inline]
    fn apply_atomic_bit_op(&self, set: u16, clear: u16) {
        self.write_set_reset(((clear as u32) << 16) | set as u32)
    }
}

//==================================================================================================
// Hardware register block
//==================================================================================================

/// GPIO port register block in the layout shared by the STM32 families with a 32 bit BSRR
///
/// Only IDR, ODR and BSRR are accessed. Mode, output type, speed, pull and alternate function
/// registers belong to the pin configuration, which happens before this crate gets involved.
#[repr(C)]
pub struct RegisterBlock {
    _moder: UnsafeCell<u32>,
    _otyper: UnsafeCell<u32>,
    _ospeedr: UnsafeCell<u32>,
    _pupdr: UnsafeCell<u32>,
    idr: UnsafeCell<u32>,
    odr: UnsafeCell<u32>,
    bsrr: UnsafeCell<u32>,
    _lckr: UnsafeCell<u32>,
    _afr: [UnsafeCell<u32>; 2],
}

impl RegisterBlock {
    /// Access the register block of the port at `addr`
    ///
    /// # Safety
    ///
    /// `addr` must be the base address of a GPIO port with this layout, for example
    /// `0x4002_0000` for GPIOA on STM32F4 parts.
    #[inline]
    pub unsafe fn from_addr(addr: usize) -> &'static RegisterBlock {
        &*(addr as *const RegisterBlock)
    }
}

unsafe impl PortRegisters for RegisterBlock {
    #[inline(always)]
    fn read_input(&self) -> u32 {
        // Safety: Atomic read with no side effects
        unsafe { read_volatile(self.idr.get()) }
    }

    #[inline(always)]
    fn read_output(&self) -> u32 {
        // Safety: Atomic read with no side effects
        unsafe { read_volatile(self.odr.get()) }
    }

    #[inline(always)]
    fn write_set_reset(&self, bits: u32) {
        // Safety: Atomic write to a stateless register
        unsafe { write_volatile(self.bsrr.get(), bits) }
    }
}

//==================================================================================================
// Simulated register block
//==================================================================================================

/// Simulated GPIO port for host-side tests
///
/// IDR and ODR are modeled as independent words, as on real hardware where the input register
/// samples the pins and the output register holds what software commanded. Writes to the
/// simulated BSRR are merged into ODR the same way the hardware does it. The last BSRR word and
/// the number of BSRR writes are recorded so tests can check the exact register traffic.
#[derive(Debug, Default)]
pub struct SimPort {
    idr: Cell<u32>,
    odr: Cell<u32>,
    last_set_reset: Cell<Option<u32>>,
    set_reset_writes: Cell<usize>,
}

impl SimPort {
    pub fn new(output: u32, input: u32) -> Self {
        SimPort {
            idr: Cell::new(input),
            odr: Cell::new(output),
            ..Default::default()
        }
    }

    /// Drive the simulated pin levels seen by the input data register
    #[inline]
    pub fn set_input(&self, bits: u32) {
        self.idr.set(bits);
    }

    #[inline]
    pub fn input(&self) -> u32 {
        self.idr.get()
    }

    #[inline]
    pub fn output(&self) -> u32 {
        self.odr.get()
    }

    /// Last word written to the bit set/reset register
    #[inline]
    pub fn last_set_reset(&self) -> Option<u32> {
        self.last_set_reset.get()
    }

    #[inline]
    pub fn set_reset_writes(&self) -> usize {
        self.set_reset_writes.get()
    }
}

unsafe impl PortRegisters for SimPort {
    fn read_input(&self) -> u32 {
        self.idr.get()
    }

    fn read_output(&self) -> u32 {
        self.odr.get()
    }

    fn write_set_reset(&self, bits: u32) {
        let set = bits & 0xFFFF;
        let clear = bits >> 16;
        self.odr.set((self.odr.get() & !clear) | set);
        self.last_set_reset.set(Some(bits));
        self.set_reset_writes.set(self.set_reset_writes.get() + 1);
    }
}

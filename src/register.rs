//! Fixed-width shift registers.

use bitvec::prelude::*;
use crate::bit::*;
use crate::error::{ Error, Result };

/// A named register holding a fixed number of bits.
///
/// New bits are inserted at index 0 and everything else moves one position
/// towards the tail, so the register doubles as a history of recent
/// observations (newest first). It is also used as a plain latch that is
/// loaded wholesale, e.g. with the value of a saturating counter.
#[derive(Clone, Debug)]
pub struct ShiftRegister {
    name: &'static str,
    width: usize,
    state: Bits,
}

// NOTE: Unlike a numeric display, this shows index 0 (the newest bit) first.
impl std::fmt::Display for ShiftRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", render(&self.state))
    }
}

impl ShiftRegister {
    /// Create a register with the specified width in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(name: &'static str, width: usize) -> Self {
        Self {
            name,
            width,
            state: filled(width, Bit::Zero),
        }
    }

    pub fn name(&self) -> &'static str { self.name }
    pub fn len(&self) -> usize { self.width }
    pub fn is_empty(&self) -> bool { self.width == 0 }

    /// Return the current contents.
    pub fn read(&self) -> &BitSlice { &self.state }

    /// Return the bit at index 0.
    pub fn msb(&self) -> Bit { msb(&self.state) }

    /// Return the contents as an unsigned number (index 0 most-significant).
    pub fn as_number(&self) -> usize { to_number(&self.state) }

    /// Replace the contents. The new value must have the same width.
    pub fn load(&mut self, bits: &BitSlice) -> Result<()> {
        if bits.len() != self.width {
            return Err(Error::InvalidLength {
                name: self.name,
                expected: self.width,
                actual: bits.len(),
            });
        }
        self.state.copy_from_bitslice(bits);
        Ok(())
    }

    /// Shift every bit one position towards the tail (discarding the last)
    /// and write `bit` at index 0.
    pub fn insert(&mut self, bit: Bit) {
        if self.width == 0 {
            return;
        }
        self.state.shift_end(1);
        self.state.set(0, bit.into());
    }

    /// Reset every bit to zero. The width never changes.
    pub fn clear(&mut self) {
        self.state = filled(self.width, Bit::Zero);
    }

    /// One line describing the register, e.g. `BHR: 1100`.
    pub fn monitor(&self) -> String {
        format!("{}: {}\n", self.name, self)
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn newest_bit_is_at_front() {
        let mut r = ShiftRegister::new("BHR", 4);
        r.insert(Bit::One);
        r.insert(Bit::Zero);
        r.insert(Bit::One);
        assert_eq!(r.read(), bitvec![1, 0, 1, 0].as_bitslice());
        assert_eq!(r.as_number(), 0b1010);
    }

    #[test]
    fn insert_past_width_drops_oldest() {
        let mut r = ShiftRegister::new("BHR", 3);
        r.insert(Bit::One);
        r.insert(Bit::Zero);
        r.insert(Bit::Zero);
        r.insert(Bit::Zero);
        assert_eq!(r.read(), bitvec![0, 0, 0].as_bitslice());
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn load_checks_width() {
        let mut r = ShiftRegister::new("SC", 2);
        r.load(&bitvec![1, 0]).unwrap();
        assert_eq!(r.msb(), Bit::One);

        let err = r.load(&bitvec![1, 0, 1]).unwrap_err();
        assert!(matches!(err,
            Error::InvalidLength { name: "SC", expected: 2, actual: 3 }
        ));
        // A failed load leaves the register untouched.
        assert_eq!(r.read(), bitvec![1, 0].as_bitslice());
    }

    #[test]
    fn clear_keeps_configured_width() {
        let mut r = ShiftRegister::new("BHR", 12);
        r.insert(Bit::One);
        r.clear();
        assert_eq!(r.len(), 12);
        assert_eq!(r.read().len(), 12);
        assert!(r.read().not_any());
    }

    #[test]
    fn monitor_line() {
        let mut r = ShiftRegister::new("BHR", 4);
        r.insert(Bit::One);
        assert_eq!(r.monitor(), "BHR: 1000\n");
    }

    proptest! {
        #[test]
        fn insert_order_is_reversed(
            width in 1usize..16,
            bits in proptest::collection::vec(any::<bool>(), 0..32),
        ) {
            let mut r = ShiftRegister::new("BHR", width);
            for b in bits.iter() {
                r.insert(Bit::of(*b));
            }
            prop_assert_eq!(r.read().len(), width);
            for (i, b) in bits.iter().rev().take(width).enumerate() {
                prop_assert_eq!(r.read()[i], *b);
            }
            // Positions never written are still zero.
            for i in bits.len().min(width)..width {
                prop_assert!(!r.read()[i]);
            }
        }
    }
}

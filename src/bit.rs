//! The single-bit primitive and helpers for treating a [BitSlice] as a
//! fixed-width unsigned number.
//!
//! Index 0 of every bit-vector in this crate is the *most-significant* bit.
//! Shift registers also insert at index 0, so the newest history bit is
//! always the most-significant bit of any index formed from a register.

use bitvec::prelude::*;

/// An owned bit-vector (index 0 is the most-significant bit).
pub type Bits = BitVec;

/// A single binary value.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bit {
    #[default]
    Zero = 0,
    One = 1,
}

impl Bit {
    pub fn of(x: bool) -> Self {
        match x {
            true => Self::One,
            false => Self::Zero,
        }
    }

    pub fn is_zero(&self) -> bool { matches!(self, Self::Zero) }
}

impl From<bool> for Bit {
    fn from(x: bool) -> Self { Self::of(x) }
}
impl From<Bit> for bool {
    fn from(b: Bit) -> Self { !b.is_zero() }
}

impl std::ops::Not for Bit {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::Zero => Self::One,
            Self::One => Self::Zero,
        }
    }
}

impl std::fmt::Display for Bit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let c = if self.is_zero() { '0' } else { '1' };
        write!(f, "{}", c)
    }
}

/// Interpret some bits as an unsigned number, most-significant bit first.
///
/// An empty slice is zero. Slices wider than a [usize] keep only their low
/// bits.
pub fn to_number(bits: &BitSlice) -> usize {
    bits.iter().by_vals()
        .fold(0usize, |acc, b| (acc << 1) | (b as usize))
}

/// Build a `width`-bit vector holding the low bits of `value`.
pub fn from_number(value: usize, width: usize) -> Bits {
    (0..width).rev()
        .map(|i| i < usize::BITS as usize && (value >> i) & 1 == 1)
        .collect()
}

/// Build a `width`-bit vector with every bit set to `bit`.
pub fn filled(width: usize, bit: Bit) -> Bits {
    BitVec::repeat(bit.into(), width)
}

/// Return the most-significant bit, or [Bit::Zero] for an empty slice.
pub fn msb(bits: &BitSlice) -> Bit {
    bits.first().map(|b| Bit::of(*b)).unwrap_or_default()
}

/// Concatenate two bit-vectors; `hi` occupies the most-significant bits.
pub fn concat(hi: &BitSlice, lo: &BitSlice) -> Bits {
    let mut res = hi.to_bitvec();
    res.extend_from_bitslice(lo);
    res
}

/// Render some bits as a string of '0' and '1', index 0 first.
pub fn render(bits: &BitSlice) -> String {
    bits.iter().by_vals()
        .map(|b| if b { '1' } else { '0' })
        .collect()
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn numeric_value_is_msb_first() {
        let bits = bitvec![1, 0, 1, 1];
        assert_eq!(to_number(&bits), 0b1011);
        assert_eq!(to_number(BitSlice::<usize, Lsb0>::empty()), 0);
    }

    #[test]
    fn from_number_matches_to_number() {
        for width in 1..=8 {
            for value in 0..(1usize << width) {
                let bits = from_number(value, width);
                assert_eq!(bits.len(), width);
                assert_eq!(to_number(&bits), value);
            }
        }
        assert_eq!(render(&from_number(0b110, 5)), "00110");
    }

    #[test]
    fn bit_conversions() {
        assert_eq!(Bit::of(true), Bit::One);
        assert_eq!(Bit::of(false), Bit::Zero);
        assert!(bool::from(Bit::One));
        assert_eq!(!Bit::Zero, Bit::One);
        assert_eq!(msb(&bitvec![1, 0]), Bit::One);
        assert_eq!(msb(&bitvec![0, 1]), Bit::Zero);
    }

    #[test]
    fn fill_and_concat() {
        assert_eq!(filled(3, Bit::One), bitvec![1, 1, 1]);
        assert_eq!(filled(2, Bit::Zero), bitvec![0, 0]);
        let key = concat(&bitvec![1, 0], &bitvec![0, 1, 1]);
        assert_eq!(render(&key), "10011");
    }
}

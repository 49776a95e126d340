//! Implementation of a prediction history table (PHT).

use bitvec::prelude::*;

use crate::bit::*;
use crate::error::{ Error, Result };
use crate::predictor::table::*;

/// A direct-indexed table of saturating counters.
///
/// Keys are bit-vectors of a fixed width and are used as row numbers (most
/// significant bit first), so distinct keys never collide. The table has
/// `2^key_width` rows of `block_width` bits each, all packed into a single
/// [BitVec]. Every row starts out as zero (weakly not-taken).
#[derive(Clone, Debug)]
pub struct PredictionHistoryTable {
    /// Width of a key in bits
    key_width: usize,

    /// Width of a counter in bits
    block_width: usize,

    /// Backing storage, row after row
    data: BitVec,
}
impl PredictionHistoryTable {
    /// Widest key (and so, largest table) we are willing to allocate.
    pub const MAX_KEY_WIDTH: usize = 24;

    /// Widest counter; wider counters would not fit in a row number.
    pub const MAX_BLOCK_WIDTH: usize = usize::BITS as usize;

    pub fn new(key_width: usize, block_width: usize) -> Result<Self> {
        if key_width > Self::MAX_KEY_WIDTH {
            return Err(Error::InvalidConfig(format!(
                "PHT key width {} exceeds {} bits", key_width, Self::MAX_KEY_WIDTH
            )));
        }
        if block_width == 0 {
            return Err(Error::InvalidConfig(
                "PHT counter width must be non-zero".to_string()
            ));
        }
        if block_width > Self::MAX_BLOCK_WIDTH {
            return Err(Error::InvalidConfig(format!(
                "PHT counter width {} exceeds {} bits",
                block_width, Self::MAX_BLOCK_WIDTH
            )));
        }
        let rows = 1usize << key_width;
        let bits = rows.checked_mul(block_width).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "PHT of {} rows by {} bits is too large", rows, block_width
            ))
        })?;
        Ok(Self {
            key_width,
            block_width,
            data: BitVec::repeat(false, bits),
        })
    }

    pub fn key_width(&self) -> usize { self.key_width }
    pub fn block_width(&self) -> usize { self.block_width }

    /// The value of a row that was never written.
    pub fn default_block(&self) -> Bits {
        filled(self.block_width, Bit::Zero)
    }

    fn check_key(&self, key: &BitSlice) -> Result<()> {
        if key.len() != self.key_width {
            return Err(Error::InvalidKeyWidth {
                expected: self.key_width,
                actual: key.len(),
            });
        }
        Ok(())
    }

    /// Return a copy of the counter stored for `key`.
    ///
    /// A key that was never written yields [Self::default_block]. The only
    /// failure is a key of the wrong width.
    pub fn get(&self, key: &BitSlice) -> Result<Bits> {
        self.check_key(key)?;
        let idx = self.get_index(key);
        Ok(self.get_entry(idx).to_bitvec())
    }

    /// Store `value` as the counter for `key`.
    pub fn put(&mut self, key: &BitSlice, value: &BitSlice) -> Result<()> {
        self.check_key(key)?;
        if value.len() != self.block_width {
            return Err(Error::InvalidLength {
                name: "PHT block",
                expected: self.block_width,
                actual: value.len(),
            });
        }
        let idx = self.get_index(key);
        self.get_entry_mut(idx).copy_from_bitslice(value);
        Ok(())
    }

    /// Reset every row to the default block.
    pub fn clear(&mut self) {
        self.data.fill(false);
    }

    /// Iterate over (row, counter) for every row holding a non-zero counter.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &BitSlice)> + '_ {
        self.data.chunks(self.block_width)
            .enumerate()
            .filter(|(_, ctr)| ctr.any())
    }

    /// Dump every non-default row as `<key>: <counter>`.
    pub fn monitor(&self) -> String {
        let mut res = String::from("PHT:\n");
        for (row, ctr) in self.occupied() {
            let key = from_number(row, self.key_width);
            res.push_str(&format!("  {}: {}\n", render(&key), render(ctr)));
        }
        res
    }
}

impl PredictorTable for PredictionHistoryTable {
    type Input<'a> = &'a BitSlice;
    type Index = usize;
    type Entry = BitSlice;

    fn size(&self) -> usize { 1 << self.key_width }

    fn get_index(&self, key: Self::Input<'_>) -> usize {
        to_number(key) & self.index_mask()
    }

    fn get_entry(&self, idx: usize) -> &BitSlice {
        let row = idx & self.index_mask();
        let w = self.block_width;
        &self.data[row * w..(row + 1) * w]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut BitSlice {
        let row = idx & self.index_mask();
        let w = self.block_width;
        &mut self.data[row * w..(row + 1) * w]
    }
}

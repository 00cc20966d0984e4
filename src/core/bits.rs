//! Bit-pack primitives over 64-bit words.
//!
//! Every packed codec in the crate (cards, card sets, tricks, scores) is laid
//! out with these functions. Codecs describe their layout with [`Field`]
//! constants, which are validated during constant evaluation, so the hot paths
//! used by the search never re-check a window at runtime.

/// Width of the words handled here.
pub const WORD_BITS: u32 = u64::BITS;

/// Bit window or width violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BitsError {
    /// `start + size` runs past the end of the word.
    #[error("bit window starting at {start} with size {size} exceeds 64 bits")]
    WindowOutOfRange { start: u32, size: u32 },

    /// A field width of zero, or one spanning the whole word.
    #[error("field width {size} must be between 1 and 63")]
    InvalidWidth { size: u32 },

    /// A value whose highest set bit does not fit in its field.
    #[error("value {value:#x} does not fit in {size} bits")]
    ValueTooWide { value: u64, size: u32 },

    /// The fields handed to [`pack`] need more than 64 bits.
    #[error("packed fields need {total} bits")]
    Overflow { total: u32 },
}

/// Word with `size` ones starting at bit `start`.
pub const fn mask(start: u32, size: u32) -> Result<u64, BitsError> {
    if start > WORD_BITS || size > WORD_BITS || start + size > WORD_BITS {
        return Err(BitsError::WindowOutOfRange { start, size });
    }
    if size == 0 {
        return Ok(0);
    }
    let ones = if size == WORD_BITS { u64::MAX } else { (1u64 << size) - 1 };
    Ok(ones << start)
}

/// Reads the `size` bits of `bits` starting at `start` as an unsigned value.
pub const fn extract(bits: u64, start: u32, size: u32) -> Result<u64, BitsError> {
    match mask(start, size) {
        Ok(0) => Ok(0),
        Ok(m) => Ok((bits & m) >> start),
        Err(e) => Err(e),
    }
}

/// Does `value` fit in `size` bits?
#[inline]
pub const fn fits(value: u64, size: u32) -> bool {
    size >= WORD_BITS || value >> size == 0
}

/// Concatenates `(value, width)` pairs into consecutive windows,
/// least-significant first.
///
/// ```
/// use jass_engine::core::bits::{extract, pack};
///
/// let packed = pack(&[(0b101, 3), (0b11, 2)]).unwrap();
/// assert_eq!(packed, 0b11_101);
/// assert_eq!(extract(packed, 3, 2).unwrap(), 0b11);
/// ```
pub fn pack(fields: &[(u64, u32)]) -> Result<u64, BitsError> {
    let mut packed = 0u64;
    let mut offset = 0u32;

    for &(value, size) in fields {
        if size == 0 || size >= WORD_BITS {
            return Err(BitsError::InvalidWidth { size });
        }
        if !fits(value, size) {
            return Err(BitsError::ValueTooWide { value, size });
        }
        if offset + size > WORD_BITS {
            return Err(BitsError::Overflow { total: offset + size });
        }
        packed |= value << offset;
        offset += size;
    }

    Ok(packed)
}

/// A validated bit window inside a 64-bit word.
///
/// Construct in `const` items: an invalid window fails constant evaluation
/// instead of surfacing at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    start: u32,
    size: u32,
    mask: u64,
}

impl Field {
    /// Window of `size` bits at `start`.
    ///
    /// # Panics
    ///
    /// If the window is empty or does not fit in 64 bits.
    #[must_use]
    pub const fn new(start: u32, size: u32) -> Self {
        if size == 0 {
            panic!("empty bit field");
        }
        let mask = match mask(start, size) {
            Ok(m) => m,
            Err(_) => panic!("bit field outside a 64-bit word"),
        };
        Self { start, size, mask }
    }

    /// Field directly above this one.
    #[must_use]
    pub const fn next(self, size: u32) -> Self {
        Self::new(self.start + self.size, size)
    }

    /// Same window moved up by `offset` bits.
    #[must_use]
    pub const fn shifted(self, offset: u32) -> Self {
        Self::new(self.start + offset, self.size)
    }

    #[inline]
    #[must_use]
    pub const fn start(self) -> u32 {
        self.start
    }

    #[inline]
    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    #[inline]
    #[must_use]
    pub const fn mask(self) -> u64 {
        self.mask
    }

    /// Largest value the field can hold.
    #[inline]
    #[must_use]
    pub const fn max_value(self) -> u64 {
        self.mask >> self.start
    }

    /// Reads the field.
    #[inline]
    #[must_use]
    pub const fn get(self, bits: u64) -> u64 {
        (bits & self.mask) >> self.start
    }

    /// Overwrites the field; bits of `value` above the width are dropped.
    #[inline]
    #[must_use]
    pub const fn set(self, bits: u64, value: u64) -> u64 {
        (bits & !self.mask) | ((value << self.start) & self.mask)
    }
}

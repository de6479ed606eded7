//! Uniform choice over small fixed tables
//!
//! The simulated classifier and camera pick entries at random. The choice
//! goes through [`Picker`] so tests can pin it.

use std::fmt::Debug;

/// Chooses an index in `0..len`
pub trait Picker: Debug + Send + Sync {
    /// `len` is never zero
    fn pick(&self, len: usize) -> usize;
}

/// Uniform draw from the operating system RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct OsPicker;

impl Picker for OsPicker {
    fn pick(&self, len: usize) -> usize {
        let len = len.max(1) as u64;
        // Rejection sampling keeps the draw unbiased for any len
        let zone = u64::MAX - (u64::MAX % len);
        loop {
            let mut bytes = [0u8; 8];
            if let Err(e) = getrandom::getrandom(&mut bytes) {
                tracing::warn!("OS RNG unavailable ({}), falling back to first entry", e);
                return 0;
            }
            let value = u64::from_le_bytes(bytes);
            if value < zone {
                return (value % len) as usize;
            }
        }
    }
}

/// Always returns the same index (wrapped into range)
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

#[cfg(test)]
impl Picker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0 % len.max(1)
    }
}

/// Pick one entry of a non-empty slice
pub fn choose<'a, T>(picker: &dyn Picker, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(picker.pick(items.len()))
}

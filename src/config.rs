//! Encoder options.

use crate::error::{Error, Result};
use crate::{MAX_MATCH_LEN, MIN_MATCH_LEN, WINDOW_SIZE};

/// How byte 3 of the header stores bits of the uncompressed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeField {
    /// `(len >> 15) & 0xFF`, as found in existing streams;
    /// bit 15 of the length shows up in both byte 2 and byte 3.
    #[default]
    Legacy,
    /// `(len >> 16) & 0xFF`, a plain 24-bit little-endian length.
    Standard,
}

/// Where output memory comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Allocation {
    /// Reserve the worst-case output size before encoding anything.
    #[default]
    Reserve,
    /// Reserve room one block at a time as blocks are flushed.
    Grow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Longest match the finder will report.
    pub max_match_len: usize,
    /// Smallest displacement the finder will consider.
    pub min_displacement: usize,
    pub size_field: SizeField,
    pub allocation: Allocation,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_match_len: MAX_MATCH_LEN,
            min_displacement: 1,
            size_field: SizeField::default(),
            allocation: Allocation::default(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_match_len(mut self, len: usize) -> Self {
        self.max_match_len = len;
        self
    }

    pub fn with_min_displacement(mut self, disp: usize) -> Self {
        self.min_displacement = disp;
        self
    }

    pub fn with_size_field(mut self, size_field: SizeField) -> Self {
        self.size_field = size_field;
        self
    }

    pub fn with_allocation(mut self, allocation: Allocation) -> Self {
        self.allocation = allocation;
        self
    }

    /// Check every field is something the encoder can honour.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_MATCH_LEN..=MAX_MATCH_LEN).contains(&self.max_match_len) {
            return Err(Error::options(format!(
                "max_match_len {} must be in range [{}, {}]",
                self.max_match_len, MIN_MATCH_LEN, MAX_MATCH_LEN
            )));
        }
        if !(1..=WINDOW_SIZE).contains(&self.min_displacement) {
            return Err(Error::options(format!(
                "min_displacement {} must be in range [1, {}]",
                self.min_displacement, WINDOW_SIZE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let opts = Options::default();
        assert_eq!(opts.max_match_len, 0x10110);
        assert_eq!(opts.min_displacement, 1);
        assert_eq!(opts.size_field, SizeField::Legacy);
        assert_eq!(opts.allocation, Allocation::Reserve);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Options::new().with_max_match_len(2).validate().is_err());
        assert!(Options::new()
            .with_max_match_len(MAX_MATCH_LEN + 1)
            .validate()
            .is_err());
        assert!(Options::new().with_min_displacement(0).validate().is_err());
        assert!(Options::new()
            .with_min_displacement(WINDOW_SIZE + 1)
            .validate()
            .is_err());
        assert!(Options::new()
            .with_max_match_len(3)
            .with_min_displacement(WINDOW_SIZE)
            .validate()
            .is_ok());
    }
}

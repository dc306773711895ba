//! LZ77-family encoder for the `0x11` container format.
//!
//! The output is a 4-byte header followed by blocks of up to eight tokens.
//! Each block starts with a flag byte (MSB first, 1 = match) and is followed
//! by one literal byte or a 2/3/4-byte back-reference per token.

pub mod config;
pub mod error;
pub mod matcher;
pub mod pack;

pub use config::{Allocation, Options, SizeField};
pub use error::{Error, Result};
pub use matcher::{find_longest_match, Match, Window};
pub use pack::{compress, compress_into, compress_with, tokens, Token, Tokens};

/// Format tag, first byte of every stream.
pub const TAG: u8 = 0x11;
pub const HEADER_LEN: usize = 4;
/// Largest input the 24-bit size field can describe.
pub const MAX_INPUT_LEN: usize = 0xFF_FFFF;
/// How far back a match may start.
pub const WINDOW_SIZE: usize = 0x1000;
/// Shortest run worth a back-reference.
pub const MIN_MATCH_LEN: usize = 3;
/// Longest run the 4-byte match form can describe (16-bit field plus 0x111).
pub const MAX_MATCH_LEN: usize = 0xFFFF + 0x111;

/// Leading 4 bytes of a stream: tag plus uncompressed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub len: usize,
}

impl Header {
    pub fn new(len: usize) -> Self {
        Header { len }
    }

    pub fn to_bytes(&self, size_field: SizeField) -> [u8; HEADER_LEN] {
        let top = match size_field {
            SizeField::Legacy => self.len >> 15,
            SizeField::Standard => self.len >> 16,
        };
        [
            TAG,
            (self.len & 0xFF) as u8,
            ((self.len >> 8) & 0xFF) as u8,
            (top & 0xFF) as u8,
        ]
    }
}

/// Largest stream `compress` can produce for `len` input bytes: every token
/// a literal, plus one flag byte per eight of them.
pub fn worst_case_len(len: usize) -> usize {
    HEADER_LEN + len + len.div_ceil(8)
}

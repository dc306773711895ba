//! Token stream packer: turns match finder decisions into flagged blocks.

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::config::{Allocation, Options};
use crate::error::{Error, Result};
use crate::matcher::Window;
use crate::{worst_case_len, Header, HEADER_LEN, MAX_INPUT_LEN, MIN_MATCH_LEN};

/// Tokens per block, one flag bit each.
const BLOCK_TOKENS: usize = 8;
// flag byte plus eight 4-byte matches
const MAX_BLOCK_LEN: usize = 1 + BLOCK_TOKENS * 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(u8),
    // len 3..=0x10110, disp 1..=0x1000
    Match { len: usize, disp: usize },
}

impl Token {
    pub fn is_match(&self) -> bool {
        matches!(self, Token::Match { .. })
    }

    /// Input bytes this token stands for.
    pub fn consumed(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Match { len, .. } => *len,
        }
    }

    /// Bytes this token takes up inside a block, not counting the flag byte.
    pub fn encoded_len(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Match { len, .. } if *len > 0x110 => 4,
            Token::Match { len, .. } if *len > 0x10 => 3,
            Token::Match { .. } => 2,
        }
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        let (len, disp) = match *self {
            Token::Literal(b) => {
                buf.push(b);
                return;
            }
            Token::Match { len, disp } => (len, disp),
        };
        let d = disp - 1;
        let d_hi = ((d >> 8) & 0x0F) as u8;
        if len > 0x110 {
            // 1LLL LLLL LLLL LLLL DDDD DDDD DDDD, L = len - 0x111
            let l = len - 0x111;
            buf.push(0x10 | ((l >> 12) & 0x0F) as u8);
            buf.push(((l >> 4) & 0xFF) as u8);
            buf.push(((l << 4) & 0xF0) as u8 | d_hi);
        } else if len > 0x10 {
            // 0000 LLLL LLLL DDDD DDDD DDDD, L = len - 0x11
            let l = len - 0x11;
            buf.push(((l >> 4) & 0x0F) as u8);
            buf.push(((l << 4) & 0xF0) as u8 | d_hi);
        } else {
            // LLLL DDDD DDDD DDDD, L = len - 1
            buf.push((((len - 1) << 4) & 0xF0) as u8 | d_hi);
        }
        buf.push((d & 0xFF) as u8);
    }
}

/// Walks the input, yielding the token the packer emits at each position.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    data: &'a [u8],
    pos: usize,
    max_match_len: usize,
    min_displacement: usize,
}

impl<'a> Tokens<'a> {
    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let b = *self.data.get(self.pos)?;
        let m = Window::new(self.data, self.pos, self.max_match_len)
            .longest_match(self.min_displacement);
        if m.len < MIN_MATCH_LEN {
            self.pos += 1;
            Some(Token::Literal(b))
        } else {
            self.pos += m.len;
            Some(Token::Match {
                len: m.len,
                disp: m.disp,
            })
        }
    }
}

/// Tokenize `data` without packing it.
pub fn tokens<'a>(data: &'a [u8], opts: &Options) -> Result<Tokens<'a>> {
    opts.validate()?;
    Ok(Tokens {
        data,
        pos: 0,
        max_match_len: opts.max_match_len,
        min_displacement: opts.min_displacement,
    })
}

fn reserve(buf: &mut Vec<u8>, additional: usize) -> Result<()> {
    buf.try_reserve(additional)
        .map_err(|_| Error::AllocationFailed {
            requested_bytes: buf.len().saturating_add(additional),
        })
}

// one flag byte and the bytes of up to eight tokens
struct Block {
    buf: Vec<u8>,
    count: usize,
}

impl Block {
    fn new() -> Self {
        let mut buf = Vec::with_capacity(MAX_BLOCK_LEN);
        buf.push(0);
        Block { buf, count: 0 }
    }

    fn is_full(&self) -> bool {
        self.count == BLOCK_TOKENS
    }

    fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn push(&mut self, token: &Token) {
        debug_assert!(!self.is_full());
        if token.is_match() {
            self.buf[0] |= 0x80 >> self.count;
        }
        token.encode(&mut self.buf);
        self.count += 1;
    }

    fn flush(&mut self, out: &mut Vec<u8>) -> Result<()> {
        reserve(out, self.buf.len())?;
        out.extend_from_slice(&self.buf);
        self.buf.clear();
        self.buf.push(0);
        self.count = 0;
        Ok(())
    }
}

fn pack(data: &[u8], out: &mut Vec<u8>, opts: &Options) -> Result<usize> {
    match opts.allocation {
        Allocation::Reserve => reserve(out, worst_case_len(data.len()))?,
        Allocation::Grow => reserve(out, HEADER_LEN)?,
    }
    out.extend_from_slice(&Header::new(data.len()).to_bytes(opts.size_field));

    let mut block = Block::new();
    let mut count = 0;
    for token in tokens(data, opts)? {
        if block.is_full() {
            block.flush(out)?;
        }
        trace!(?token, "token");
        block.push(&token);
        count += 1;
    }
    if !block.is_empty() {
        block.flush(out)?;
    }
    Ok(count)
}

/// Compress `data`, appending the stream to `out`.
///
/// Returns the number of bytes appended. On error `out` is left as it was.
pub fn compress_into(data: &[u8], out: &mut Vec<u8>, opts: &Options) -> Result<usize> {
    if data.len() > MAX_INPUT_LEN {
        warn!(len = data.len(), "input does not fit the size field");
        return Err(Error::InputTooLarge {
            len: data.len(),
            max: MAX_INPUT_LEN,
        });
    }
    if let Err(e) = opts.validate() {
        warn!(error = %e, "rejecting options");
        return Err(e);
    }

    let start = Instant::now();
    let base = out.len();
    match pack(data, out, opts) {
        Ok(count) => {
            let written = out.len() - base;
            debug!(
                input_len = data.len(),
                output_len = written,
                tokens = count,
                elapsed_us = start.elapsed().as_micros() as u64,
                "compressed"
            );
            Ok(written)
        }
        Err(e) => {
            out.truncate(base);
            warn!(error = %e, input_len = data.len(), "compression failed");
            Err(e)
        }
    }
}

/// Compress `data` into a new buffer.
pub fn compress_with(data: &[u8], opts: &Options) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    compress_into(data, &mut out, opts)?;
    Ok(out)
}

/// Compress `data` with default options.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, &Options::default())
}

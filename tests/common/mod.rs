//! Reference decoder for checking encoder output. Test-only.
#![allow(dead_code)]

/// Rebuild `len` bytes from a stream, checking that no bytes are left over.
pub fn decode(stream: &[u8], len: usize) -> Vec<u8> {
    assert_eq!(stream[0], 0x11, "bad tag");
    let mut out: Vec<u8> = Vec::with_capacity(len);
    let mut pos = 4;
    while out.len() < len {
        let flags = stream[pos];
        pos += 1;
        for slot in 0..8 {
            if out.len() >= len {
                break;
            }
            if flags & (0x80 >> slot) == 0 {
                out.push(stream[pos]);
                pos += 1;
                continue;
            }
            let b0 = stream[pos] as usize;
            let (mlen, hi) = match b0 >> 4 {
                0 => {
                    let b1 = stream[pos + 1] as usize;
                    pos += 2;
                    ((((b0 & 0xF) << 4) | (b1 >> 4)) + 0x11, b1 & 0xF)
                }
                1 => {
                    let b1 = stream[pos + 1] as usize;
                    let b2 = stream[pos + 2] as usize;
                    pos += 3;
                    ((((b0 & 0xF) << 12) | (b1 << 4) | (b2 >> 4)) + 0x111, b2 & 0xF)
                }
                n => {
                    pos += 1;
                    (n + 1, b0 & 0xF)
                }
            };
            let disp = ((hi << 8) | stream[pos] as usize) + 1;
            pos += 1;
            assert!(disp <= out.len(), "displacement {} past start", disp);
            let from = out.len() - disp;
            for k in 0..mlen {
                out.push(out[from + k]);
            }
        }
    }
    assert_eq!(out.len(), len, "match ran past the declared length");
    assert_eq!(pos, stream.len(), "trailing bytes after last block");
    out
}

/// Number of flag bytes in a stream, walking block by block.
pub fn block_count(stream: &[u8], len: usize) -> usize {
    let mut pos = 4;
    let mut produced = 0;
    let mut blocks = 0;
    while produced < len {
        let flags = stream[pos];
        pos += 1;
        blocks += 1;
        for slot in 0..8 {
            if produced >= len {
                break;
            }
            if flags & (0x80 >> slot) == 0 {
                pos += 1;
                produced += 1;
                continue;
            }
            let b0 = stream[pos] as usize;
            let (size, mlen) = match b0 >> 4 {
                0 => (3, ((((b0 & 0xF) << 4) | (stream[pos + 1] as usize >> 4)) + 0x11)),
                1 => (
                    4,
                    ((((b0 & 0xF) << 12)
                        | ((stream[pos + 1] as usize) << 4)
                        | (stream[pos + 2] as usize >> 4))
                        + 0x111),
                ),
                n => (2, n + 1),
            };
            pos += size;
            produced += mlen;
        }
    }
    blocks
}

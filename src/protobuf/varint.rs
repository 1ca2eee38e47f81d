//! Read varints from byte slices.
//!
//! Variable length integers (_varints_) are the default encoding of integers
//! in Protocol Buffers messages, including field tags and lengths.
//!
//! See <https://protobuf.dev/programming-guides/encoding/#varints>.

/// Maximum number of bytes for an encoded varint.
///
/// A decoded varint is a u64 value. Each byte contains 7 value bits and one
/// continuation bit. Hence we need 9 "full" bytes plus one bit from the 10th byte.
const MAX_VARINT_LEN: usize = 10;

#[derive(Debug, PartialEq)]
pub enum VarintError {
    /// The input is empty.
    Eof,
    /// The varint length exceeds 64-bits, or the input ended before a full
    /// varint was read.
    InvalidVarint,
}

/// Read a varint value of up to 64-bits from the start of `buf`.
///
/// Returns the value and the number of bytes it occupied.
pub fn read_varint(buf: &[u8]) -> Result<(u64, usize), VarintError> {
    if buf.is_empty() {
        return Err(VarintError::Eof);
    }

    let mut value = 0;
    for (i, byte) in buf.iter().copied().take(MAX_VARINT_LEN).enumerate() {
        // High bit is continuation bit. Low 7 bits are the payload.
        value |= ((byte & 0x7f) as u64) << (i * 7);
        if byte <= 0x7f {
            // Only one value bit from the last byte may be used.
            if i + 1 == MAX_VARINT_LEN && byte > 0x01 {
                break;
            }
            return Ok((value, i + 1));
        }
    }

    Err(VarintError::InvalidVarint)
}

/// Encode `val` as a varint.
#[cfg(test)]
pub fn encode_varint(mut val: u64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(MAX_VARINT_LEN);

    loop {
        let byte = (val & 0x7f) as u8;
        if val <= 0x7f {
            bytes.push(byte);
            break;
        }
        bytes.push(byte | 0x80);
        val >>= 7;
    }

    bytes
}

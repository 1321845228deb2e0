//! Length-preserving conversion between payload integers and byte buffers
//!
//! Payload integers are little-endian: byte 0 is the least significant. An
//! integer drops its high zero bytes, so a buffer whose top byte is zero would
//! come back shorter after a round trip. Callers [`pin`] a sentinel byte of
//! value 1 above the data before encoding and truncate it away after decoding.
//!
//! ```
//! use tenacc_core::codec::{decode, encode, pin, pinned_len};
//!
//! let data = vec![0x2a, 0x00, 0x00];
//! let mut buf = data.clone();
//! pin(&mut buf);
//!
//! let value = encode(&buf);
//! let mut back = decode(&value, pinned_len(data.len()));
//! back.truncate(data.len());
//! assert_eq!(back, data);
//! ```

use num_bigint::BigUint;

/// Value of the guard byte placed above the payload data
pub const SENTINEL: u8 = 1;

/// Length of a buffer of `len` data bytes once pinned
pub const fn pinned_len(len: usize) -> usize {
    len + 1
}

/// Append the sentinel byte above the most significant data byte
pub fn pin(bytes: &mut Vec<u8>) {
    bytes.push(SENTINEL);
}

/// Render `value` as exactly `len` little-endian bytes.
///
/// Short encodings are zero-padded; only the low `len` bytes of a longer one
/// are kept.
pub fn decode(value: &BigUint, len: usize) -> Vec<u8> {
    let mut bytes = value.to_bytes_le();
    bytes.resize(len, 0);
    bytes
}

/// Interpret a little-endian byte buffer as an integer
pub fn encode(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}

/// Number of bytes in the natural encoding of `value` (zero for zero)
pub fn natural_len(value: &BigUint) -> usize {
    value.bits().div_ceil(8) as usize
}

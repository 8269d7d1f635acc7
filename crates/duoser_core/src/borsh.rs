//! Borsh-style binary codec.
//!
//! | shape | layout |
//! |---|---|
//! | bool | 1 byte, `0` or `1` |
//! | integers, floats | natural width, little-endian |
//! | `u128` / `i128` | low 64 bits then high 64 bits, each little-endian |
//! | string, byte payload | `u32` byte length, then the raw bytes |
//! | nullable | `0`, or `1` followed by the payload |
//! | array, set, map | `u32` count, then the elements or key-value pairs |
//! | record | the fields in declared order, nothing else |

mod de;
mod ser;

pub use de::BorshDecoder;
pub use ser::{BorshEncoder, ByteSink, LeBytes};

use crate::dispatch::{Decode, Encode, Encoder};
use crate::err::{Error, SerDeResult};

/// Encode a value to a new vector of bytes
pub fn to_vec<T: Encode + ?Sized>(value: &T) -> SerDeResult<Vec<u8>> {
    let mut encoder = BorshEncoder::new();
    value.encode(&mut encoder)?;

    let bytes = encoder.finish();
    log::trace!("borsh: encoded {} bytes", bytes.len());

    Ok(bytes)
}

/// Append the encoding of a value to an existing buffer.
///
/// On error the buffer is left as it was before the call.
pub fn to_writer<T: Encode + ?Sized>(buffer: &mut Vec<u8>, value: &T) -> SerDeResult<()> {
    let start = buffer.len();
    let mut encoder = BorshEncoder::from_vec(std::mem::take(buffer));
    let res = value.encode(&mut encoder);

    *buffer = encoder.sink.into_inner();
    if res.is_err() {
        log::debug!("borsh: dropping {} partial bytes", buffer.len() - start);
        buffer.truncate(start);
    }

    res
}

/// Decode a value from a slice of bytes.
///
/// The whole slice must be consumed.
pub fn from_slice<T: Decode>(bytes: &[u8]) -> SerDeResult<T> {
    let mut decoder = BorshDecoder::from_slice(bytes);
    let value = T::decode(&mut decoder)?;

    match decoder.remaining() {
        0 => {
            log::trace!("borsh: decoded {} bytes", bytes.len());
            Ok(value)
        }
        trailing => {
            log::debug!("borsh: {} trailing bytes after value", trailing);
            Err(Error::TrailingBytes(trailing))
        }
    }
}

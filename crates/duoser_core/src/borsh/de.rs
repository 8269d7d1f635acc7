//! Implementation of [Decoder] for [BorshDecoder]

use crate::consts::{self, LengthPrefix};
use crate::dispatch::{Decode, Decoder, Record};
use crate::err::{Error, SerDeResult};

/// This data structure reads back the bytes written by
/// [BorshEncoder](super::BorshEncoder).
///
/// Nothing in the input describes itself; the requested type decides how many
/// bytes are consumed at each step.
pub struct BorshDecoder<'de> {
    input: ByteViewer<'de>,
}

impl<'de> BorshDecoder<'de> {
    pub fn from_slice(s: &'de [u8]) -> Self {
        Self {
            input: ByteViewer::from_slice(s),
        }
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.input.distance_to_end()
    }

    /// Reads a length prefix.
    fn pop_len(&mut self) -> SerDeResult<usize> {
        const NUM_BYTES: usize = std::mem::size_of::<LengthPrefix>();
        let bytes = self.input.next_bytes_fixed::<NUM_BYTES>()?;
        Ok(LengthPrefix::from_le_bytes(bytes) as usize)
    }
}

/// Impl decode for fixed-width primitives
macro_rules! decode_le_primitive {
    ($($fn_name: ident: $num_type: ty),*) => {
        $(
            fn $fn_name(&mut self) -> SerDeResult<$num_type> {
                const NUM_BYTES: usize = std::mem::size_of::<$num_type>();
                let bytes = self.input.next_bytes_fixed::<NUM_BYTES>()?;
                Ok(<$num_type>::from_le_bytes(bytes))
            }
        )*
    };
}

impl<'de> Decoder for BorshDecoder<'de> {
    fn decode_bool(&mut self) -> SerDeResult<bool> {
        match self.input.next_byte()? {
            consts::BOOL_TRUE => Ok(true),
            consts::BOOL_FALSE => Ok(false),
            other => {
                log::debug!("invalid boolean byte {}", other);
                Err(Error::InvalidBool(other))
            }
        }
    }

    decode_le_primitive! {
        decode_u8: u8, decode_u16: u16, decode_u32: u32, decode_u64: u64,
        decode_i8: i8, decode_i16: i16, decode_i32: i32, decode_i64: i64,
        decode_f32: f32, decode_f64: f64
    }

    fn decode_u128(&mut self) -> SerDeResult<u128> {
        let lo = self.decode_u64()?;
        let hi = self.decode_u64()?;
        Ok(((hi as u128) << 64) | lo as u128)
    }

    fn decode_i128(&mut self) -> SerDeResult<i128> {
        self.decode_u128().map(|v| v as i128)
    }

    fn decode_string(&mut self) -> SerDeResult<String> {
        let len = self.pop_len()?;
        let bytes = self.input.next_bytes(len)?;

        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(Error::from)
    }

    fn decode_bytes(&mut self) -> SerDeResult<Vec<u8>> {
        let len = self.pop_len()?;
        self.input.next_bytes(len).map(<[u8]>::to_vec)
    }

    fn decode_option<T: Decode>(&mut self) -> SerDeResult<Option<T>> {
        match self.input.next_byte()? {
            consts::OPTION_NONE => Ok(None),
            consts::OPTION_SOME => T::decode(self).map(Some),
            other => {
                log::debug!("invalid presence flag {}", other);
                Err(Error::InvalidPresenceFlag(other))
            }
        }
    }

    fn decode_seq<T: Decode>(&mut self) -> SerDeResult<Vec<T>> {
        let len = self.pop_len()?;

        let mut items = Vec::with_capacity(len.min(consts::MAX_PREALLOC_ELEMENTS));
        for _ in 0..len {
            items.push(T::decode(self)?);
        }

        Ok(items)
    }

    fn decode_map<K: Decode, V: Decode>(&mut self) -> SerDeResult<Vec<(K, V)>> {
        let len = self.pop_len()?;

        let mut entries = Vec::with_capacity(len.min(consts::MAX_PREALLOC_ELEMENTS));
        for _ in 0..len {
            let key = K::decode(self)?;
            let value = V::decode(self)?;
            entries.push((key, value));
        }

        Ok(entries)
    }

    fn decode_record<R: Record>(&mut self) -> SerDeResult<R> {
        R::decode_fields(self)
    }

    fn decode_field<T: Decode>(&mut self, _name: &'static str) -> SerDeResult<T> {
        T::decode(self)
    }
}

/// A bounds-checked cursor into an existing slice of bytes.
///
/// Every read either returns the requested bytes and advances, or fails with
/// [Error::UnexpectedEof] and leaves the offset untouched.
struct ByteViewer<'arr> {
    slice: &'arr [u8],
    offset: usize,
}

impl<'arr> ByteViewer<'arr> {
    /// Create a new viewer on a byte slice
    pub fn from_slice(s: &'arr [u8]) -> Self {
        Self {
            slice: s,
            offset: 0,
        }
    }

    /// Number of bytes between the offset and the end of the slice
    pub fn distance_to_end(&self) -> usize {
        self.slice.len() - self.offset
    }

    /// Return the next byte and advance the view
    pub fn next_byte(&mut self) -> SerDeResult<u8> {
        let [b] = self.next_bytes_fixed::<1>()?;
        Ok(b)
    }

    /// Returns the next slice of bytes and advances the offset.
    pub fn next_bytes(&mut self, size: usize) -> SerDeResult<&'arr [u8]> {
        let remaining = self.distance_to_end();
        if size > remaining {
            log::debug!("truncated input: needed {}, {} remaining", size, remaining);
            return Err(Error::UnexpectedEof {
                needed: size,
                remaining,
            });
        }

        let view = &self.slice[self.offset..(self.offset + size)];
        self.offset += size;

        Ok(view)
    }

    /// Returns a copy of the next slice of bytes as a fixed-size array.
    pub fn next_bytes_fixed<const ARR_SIZE: usize>(&mut self) -> SerDeResult<[u8; ARR_SIZE]> {
        let mut arr = [0_u8; ARR_SIZE];
        arr.copy_from_slice(self.next_bytes(ARR_SIZE)?);
        Ok(arr)
    }
}

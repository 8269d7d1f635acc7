//! The encode/decode dispatch protocol.
//!
//! A value is written by calling [Encode::encode] with a concrete [Encoder].
//! The impl that runs is picked by the compiler from the value's static type,
//! so the output never carries a type tag. Composite impls recurse back into
//! [Encode] for their elements, and only the leaf methods of the [Encoder]
//! differ between the binary and the text format.
//!
//! Decoding is the exact mirror: the type the caller asks for is the only
//! information used to decide what to read next.
//!
//! ```ignore
//! use duoser_core::{borsh, json};
//!
//! let value: Option<Vec<u32>> = Some(vec![42, 11]);
//!
//! let bytes = borsh::to_vec(&value)?;
//! assert_eq!(bytes, [1, 2, 0, 0, 0, 42, 0, 0, 0, 11, 0, 0, 0]);
//! assert_eq!(json::to_string(&value)?, "[42,11]");
//! ```

mod impls;

use crate::err::SerDeResult;

/// Types that can be written through any [Encoder].
///
/// Implemented for every supported std shape and generated for
/// records by `#[derive(Record)]`.
pub trait Encode {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()>;
}

/// Types that can be reconstructed from any [Decoder].
pub trait Decode: Sized {
    fn decode<D: Decoder>(decoder: &mut D) -> SerDeResult<Self>;
}

/// The record bridge.
///
/// A record exposes its fields to the protocol without the protocol knowing
/// its shape. [Record::encode_fields] must call [Encoder::encode_field] once
/// per field in declared order, base record fields first for composed
/// records, and [Record::decode_fields] must consume them in the same order.
pub trait Record {
    fn encode_fields<E: Encoder>(&self, encoder: &mut E) -> SerDeResult<()>;

    fn decode_fields<D: Decoder>(decoder: &mut D) -> SerDeResult<Self>
    where
        Self: Sized;
}

/// Format-specific leaf emission.
///
/// Composite handling (ordering of sets and maps, presence checks) lives in
/// the [Encode] impls. An encoder only decides how each piece looks on the
/// wire.
pub trait Encoder: Sized {
    /// What the encoder hands back once the top-level value is written.
    type Output;

    fn encode_bool(&mut self, v: bool) -> SerDeResult<()>;

    fn encode_u8(&mut self, v: u8) -> SerDeResult<()>;
    fn encode_u16(&mut self, v: u16) -> SerDeResult<()>;
    fn encode_u32(&mut self, v: u32) -> SerDeResult<()>;
    fn encode_u64(&mut self, v: u64) -> SerDeResult<()>;
    fn encode_u128(&mut self, v: u128) -> SerDeResult<()>;

    fn encode_i8(&mut self, v: i8) -> SerDeResult<()>;
    fn encode_i16(&mut self, v: i16) -> SerDeResult<()>;
    fn encode_i32(&mut self, v: i32) -> SerDeResult<()>;
    fn encode_i64(&mut self, v: i64) -> SerDeResult<()>;
    fn encode_i128(&mut self, v: i128) -> SerDeResult<()>;

    fn encode_f32(&mut self, v: f32) -> SerDeResult<()>;
    fn encode_f64(&mut self, v: f64) -> SerDeResult<()>;

    fn encode_str(&mut self, v: &str) -> SerDeResult<()>;

    /// Raw binary payload, as opposed to a sequence of `u8` numbers.
    fn encode_bytes(&mut self, v: &[u8]) -> SerDeResult<()>;

    /// An absent nullable. Nothing is recursed into.
    fn encode_none(&mut self) -> SerDeResult<()>;

    /// A present nullable, followed by the wrapped value.
    fn encode_some<T: Encode + ?Sized>(&mut self, value: &T) -> SerDeResult<()>;

    /// Array-like collections and sets.
    ///
    /// Items are written in iteration order. Sets arrive already sorted.
    fn encode_seq<'a, T, I>(&mut self, items: I) -> SerDeResult<()>
    where
        T: Encode + 'a,
        I: ExactSizeIterator<Item = &'a T>;

    /// Key-value pairs, already sorted by key.
    fn encode_map<'a, K, V, I>(&mut self, entries: I) -> SerDeResult<()>
    where
        K: Encode + 'a,
        V: Encode + 'a,
        I: ExactSizeIterator<Item = (&'a K, &'a V)>;

    fn encode_record<R: Record + ?Sized>(&mut self, record: &R) -> SerDeResult<()>;

    /// Called by [Record::encode_fields] for each field.
    fn encode_field<T: Encode + ?Sized>(&mut self, name: &'static str, value: &T)
        -> SerDeResult<()>;

    /// Release the output to the caller.
    fn finish(self) -> Self::Output;
}

/// Format-specific leaf consumption, the mirror of [Encoder].
pub trait Decoder: Sized {
    fn decode_bool(&mut self) -> SerDeResult<bool>;

    fn decode_u8(&mut self) -> SerDeResult<u8>;
    fn decode_u16(&mut self) -> SerDeResult<u16>;
    fn decode_u32(&mut self) -> SerDeResult<u32>;
    fn decode_u64(&mut self) -> SerDeResult<u64>;
    fn decode_u128(&mut self) -> SerDeResult<u128>;

    fn decode_i8(&mut self) -> SerDeResult<i8>;
    fn decode_i16(&mut self) -> SerDeResult<i16>;
    fn decode_i32(&mut self) -> SerDeResult<i32>;
    fn decode_i64(&mut self) -> SerDeResult<i64>;
    fn decode_i128(&mut self) -> SerDeResult<i128>;

    fn decode_f32(&mut self) -> SerDeResult<f32>;
    fn decode_f64(&mut self) -> SerDeResult<f64>;

    fn decode_string(&mut self) -> SerDeResult<String>;

    fn decode_bytes(&mut self) -> SerDeResult<Vec<u8>>;

    /// Reads the presence marker and, only if present, the payload.
    fn decode_option<T: Decode>(&mut self) -> SerDeResult<Option<T>>;

    fn decode_seq<T: Decode>(&mut self) -> SerDeResult<Vec<T>>;

    /// Entries in the order they were written.
    ///
    /// Ordering is checked by the caller, not the decoder.
    fn decode_map<K: Decode, V: Decode>(&mut self) -> SerDeResult<Vec<(K, V)>>;

    fn decode_record<R: Record>(&mut self) -> SerDeResult<R>;

    /// Called by [Record::decode_fields] for each field.
    fn decode_field<T: Decode>(&mut self, name: &'static str) -> SerDeResult<T>;
}

//! Implementation of [Encoder] for [BorshEncoder]

use crate::consts::{self, LengthPrefix};
use crate::dispatch::{Encode, Encoder, Record};
use crate::err::{Error, SerDeResult};

/// Scalars that the sink can store in their native little-endian form.
pub trait LeBytes: Copy {
    fn store_le(self, buffer: &mut Vec<u8>);
}

/// Impl [LeBytes] for primitives
macro_rules! le_bytes_primitive {
    ($($num_type: ty),*) => {
        $(
            impl LeBytes for $num_type {
                fn store_le(self, buffer: &mut Vec<u8>) {
                    buffer.extend(self.to_le_bytes());
                }
            }
        )*
    };
}

le_bytes_primitive! {u8, u16, u32, u64, i8, i16, i32, i64, f32, f64}

/// Append-only growable byte buffer.
#[derive(Debug, Default)]
pub struct ByteSink {
    output: Vec<u8>,
}

impl ByteSink {
    /// Wrap an existing buffer. Bytes are appended after its current contents.
    pub fn from_vec(output: Vec<u8>) -> Self {
        Self { output }
    }

    /// Append a fixed-width scalar.
    pub fn append_scalar<T: LeBytes>(&mut self, value: T) {
        value.store_le(&mut self.output);
    }

    pub fn append_raw(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Returns exactly the bytes written, with no spare capacity.
    pub fn finalize(mut self) -> Vec<u8> {
        self.output.shrink_to_fit();
        self.output
    }

    /// Returns the underlying buffer as is, keeping its capacity.
    pub fn into_inner(self) -> Vec<u8> {
        self.output
    }
}

/// This data structure contains the encoded bytes of any supported value.
///
/// Layout is fully determined by the static type: little-endian scalars,
/// 4-byte length prefixes, no tags and no separators.
#[derive(Debug, Default)]
pub struct BorshEncoder {
    pub(crate) sink: ByteSink,
}

impl BorshEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue writing into an existing buffer.
    pub fn from_vec(output: Vec<u8>) -> Self {
        Self {
            sink: ByteSink::from_vec(output),
        }
    }

    /// Writes the length prefix of a string, payload or collection.
    fn write_len(&mut self, len: usize) -> SerDeResult<()> {
        let prefix = LengthPrefix::try_from(len).map_err(|_| Error::LengthOverflow(len))?;
        self.sink.append_scalar(prefix);
        Ok(())
    }
}

/// Impl encode for fixed-width primitives
macro_rules! encode_le_primitive {
    ($($fn_name: ident: $num_type: ty),*) => {
        $(
            fn $fn_name(&mut self, v: $num_type) -> SerDeResult<()> {
                self.sink.append_scalar(v);
                Ok(())
            }
        )*
    };
}

impl Encoder for BorshEncoder {
    type Output = Vec<u8>;

    fn encode_bool(&mut self, v: bool) -> SerDeResult<()> {
        self.sink.append_scalar(match v {
            true => consts::BOOL_TRUE,
            false => consts::BOOL_FALSE,
        });
        Ok(())
    }

    encode_le_primitive! {
        encode_u8: u8, encode_u16: u16, encode_u32: u32, encode_u64: u64,
        encode_i8: i8, encode_i16: i16, encode_i32: i32, encode_i64: i64,
        encode_f32: f32, encode_f64: f64
    }

    // low 64 bits first, then the high 64 bits
    fn encode_u128(&mut self, v: u128) -> SerDeResult<()> {
        self.sink.append_scalar(v as u64);
        self.sink.append_scalar((v >> 64) as u64);
        Ok(())
    }

    fn encode_i128(&mut self, v: i128) -> SerDeResult<()> {
        self.encode_u128(v as u128)
    }

    fn encode_str(&mut self, v: &str) -> SerDeResult<()> {
        self.encode_bytes(v.as_bytes())
    }

    fn encode_bytes(&mut self, v: &[u8]) -> SerDeResult<()> {
        self.write_len(v.len())?;
        self.sink.append_raw(v);
        Ok(())
    }

    fn encode_none(&mut self) -> SerDeResult<()> {
        self.sink.append_scalar(consts::OPTION_NONE);
        Ok(())
    }

    fn encode_some<T: Encode + ?Sized>(&mut self, value: &T) -> SerDeResult<()> {
        self.sink.append_scalar(consts::OPTION_SOME);
        value.encode(self)
    }

    fn encode_seq<'a, T, I>(&mut self, items: I) -> SerDeResult<()>
    where
        T: Encode + 'a,
        I: ExactSizeIterator<Item = &'a T>,
    {
        self.write_len(items.len())?;
        for item in items {
            item.encode(self)?;
        }
        Ok(())
    }

    fn encode_map<'a, K, V, I>(&mut self, entries: I) -> SerDeResult<()>
    where
        K: Encode + 'a,
        V: Encode + 'a,
        I: ExactSizeIterator<Item = (&'a K, &'a V)>,
    {
        self.write_len(entries.len())?;
        for (key, value) in entries {
            key.encode(self)?;
            value.encode(self)?;
        }
        Ok(())
    }

    // records are the bare concatenation of their fields
    fn encode_record<R: Record + ?Sized>(&mut self, record: &R) -> SerDeResult<()> {
        record.encode_fields(self)
    }

    fn encode_field<T: Encode + ?Sized>(
        &mut self,
        _name: &'static str,
        value: &T,
    ) -> SerDeResult<()> {
        value.encode(self)
    }

    fn finish(self) -> Self::Output {
        self.sink.finalize()
    }
}

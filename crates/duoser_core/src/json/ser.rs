//! Implementation of [Encoder] for [JsonEncoder]

use std::fmt::Write;

use base64::Engine;

use crate::consts;
use crate::dispatch::{Encode, Encoder, Record};
use crate::err::{Error, SerDeResult};

/// Accumulates the JSON text of any supported value.
///
/// Record fields appear in declared order, not sorted.
#[derive(Debug, Default)]
pub struct JsonEncoder {
    output: String,
    // one entry per open record, set once its first field is written
    fields_written: Vec<bool>,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a quoted, escaped JSON string.
    fn write_quoted(&mut self, v: &str) -> SerDeResult<()> {
        self.output.push_str(&serde_json::to_string(v)?);
        Ok(())
    }

    fn write_display(&mut self, v: impl std::fmt::Display) {
        // writing into a String cannot fail
        let _ = write!(self.output, "{}", v);
    }

    /// Wide integers are quoted so double-based readers keep every digit.
    fn write_quoted_display(&mut self, v: impl std::fmt::Display) {
        let _ = write!(self.output, "\"{}\"", v);
    }

    /// Shortest round-trip form with at least one fractional digit (`0.0`, `1.0e20`).
    fn write_float(&mut self, v: impl std::fmt::Debug, finite: bool) -> SerDeResult<()> {
        if !finite {
            return Err(Error::NonFiniteFloat);
        }

        let rendered = format!("{:?}", v);
        match rendered.split_once('e') {
            Some((mantissa, exponent)) if !mantissa.contains('.') => {
                let _ = write!(self.output, "{}.0e{}", mantissa, exponent);
            }
            _ => self.output.push_str(&rendered),
        }
        Ok(())
    }
}

/// Impl encode for numbers written as bare JSON numbers
macro_rules! encode_bare_number {
    ($($fn_name: ident: $num_type: ty),*) => {
        $(
            fn $fn_name(&mut self, v: $num_type) -> SerDeResult<()> {
                self.write_display(v);
                Ok(())
            }
        )*
    };
}

/// Impl encode for numbers written as quoted decimal strings
macro_rules! encode_quoted_number {
    ($($fn_name: ident: $num_type: ty),*) => {
        $(
            fn $fn_name(&mut self, v: $num_type) -> SerDeResult<()> {
                self.write_quoted_display(v);
                Ok(())
            }
        )*
    };
}

impl Encoder for JsonEncoder {
    type Output = String;

    fn encode_bool(&mut self, v: bool) -> SerDeResult<()> {
        self.output.push_str(match v {
            true => "true",
            false => "false",
        });
        Ok(())
    }

    encode_bare_number! {
        encode_u8: u8, encode_u16: u16, encode_u32: u32,
        encode_i8: i8, encode_i16: i16, encode_i32: i32
    }

    encode_quoted_number! {
        encode_u64: u64, encode_u128: u128,
        encode_i64: i64, encode_i128: i128
    }

    fn encode_f32(&mut self, v: f32) -> SerDeResult<()> {
        self.write_float(v, v.is_finite())
    }

    fn encode_f64(&mut self, v: f64) -> SerDeResult<()> {
        self.write_float(v, v.is_finite())
    }

    fn encode_str(&mut self, v: &str) -> SerDeResult<()> {
        self.write_quoted(v)
    }

    fn encode_bytes(&mut self, v: &[u8]) -> SerDeResult<()> {
        // the base64 alphabet needs no escaping
        self.output.push('"');
        base64::engine::general_purpose::STANDARD.encode_string(v, &mut self.output);
        self.output.push('"');
        Ok(())
    }

    fn encode_none(&mut self) -> SerDeResult<()> {
        self.output.push_str("null");
        Ok(())
    }

    fn encode_some<T: Encode + ?Sized>(&mut self, value: &T) -> SerDeResult<()> {
        value.encode(self)
    }

    fn encode_seq<'a, T, I>(&mut self, items: I) -> SerDeResult<()>
    where
        T: Encode + 'a,
        I: ExactSizeIterator<Item = &'a T>,
    {
        self.output.push('[');
        for (idx, item) in items.enumerate() {
            if idx > 0 {
                self.output.push(',');
            }
            item.encode(self)?;
        }
        self.output.push(']');
        Ok(())
    }

    // [{"key":K,"value":V},...]
    fn encode_map<'a, K, V, I>(&mut self, entries: I) -> SerDeResult<()>
    where
        K: Encode + 'a,
        V: Encode + 'a,
        I: ExactSizeIterator<Item = (&'a K, &'a V)>,
    {
        self.output.push('[');
        for (idx, (key, value)) in entries.enumerate() {
            if idx > 0 {
                self.output.push(',');
            }
            self.output.push('{');
            self.write_quoted(consts::MAP_ENTRY_KEY)?;
            self.output.push(':');
            key.encode(self)?;
            self.output.push(',');
            self.write_quoted(consts::MAP_ENTRY_VALUE)?;
            self.output.push(':');
            value.encode(self)?;
            self.output.push('}');
        }
        self.output.push(']');
        Ok(())
    }

    fn encode_record<R: Record + ?Sized>(&mut self, record: &R) -> SerDeResult<()> {
        self.output.push('{');
        self.fields_written.push(false);

        let res = record.encode_fields(self);

        self.fields_written.pop();
        self.output.push('}');
        res
    }

    fn encode_field<T: Encode + ?Sized>(
        &mut self,
        name: &'static str,
        value: &T,
    ) -> SerDeResult<()> {
        if let Some(written) = self.fields_written.last_mut() {
            if *written {
                self.output.push(',');
            }
            *written = true;
        }

        self.write_quoted(name)?;
        self.output.push(':');
        value.encode(self)
    }

    fn finish(self) -> Self::Output {
        self.output
    }
}

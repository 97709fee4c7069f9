//! Tagged binary fields.
//!
//! Every structure on the wire is a run of `(field number, value)` pairs in
//! ascending field order. The field number is written as a varint, followed
//! by one of:
//!
//! ```text
//! uvarint  — LEB128 unsigned integer
//! string   — uvarint length, then UTF-8 bytes
//! bytes    — uvarint length, then raw bytes
//! hash     — exactly 32 raw bytes, no length prefix
//! ```
//!
//! The remote node treats an absent field and a zero-valued field as the
//! same thing and never writes the latter. [`FieldWriter`] therefore elides
//! zero values for optional fields; the free `encode_*` functions always
//! write and leave that decision to the caller.

use super::CodecError;
use crate::config::{HASH_LENGTH, MAX_FIELD_NUMBER, MAX_VARINT_LENGTH};

/// Appends `value` as an unsigned LEB128 varint.
pub fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

fn write_tag(out: &mut Vec<u8>, field: u32) {
    debug_assert!(
        (1..=MAX_FIELD_NUMBER).contains(&field),
        "field number {field} out of range"
    );
    write_varint(out, u64::from(field));
}

fn write_length_prefixed(out: &mut Vec<u8>, value: &[u8]) {
    write_varint(out, value.len() as u64);
    out.extend_from_slice(value);
}

/// Encodes a varint field. Callers must skip the call when `value == 0`.
pub fn encode_uvarint(field: u32, value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(11);
    write_tag(&mut out, field);
    write_varint(&mut out, value);
    out
}

/// Encodes a length-prefixed string field. Callers must skip empty strings.
pub fn encode_string(field: u32, value: &str) -> Vec<u8> {
    encode_bytes(field, value.as_bytes())
}

/// Encodes a length-prefixed byte-string field. Callers must skip empty values.
pub fn encode_bytes(field: u32, value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len() + 6);
    write_tag(&mut out, field);
    write_length_prefixed(&mut out, value);
    out
}

// ---------------------------------------------------------------------------
// FieldWriter
// ---------------------------------------------------------------------------

/// Accumulates the fields of one structure.
///
/// Optional-field methods skip zero values; the `repeated_*` methods write
/// every element in input order, since element order and count are part of
/// the encoding.
#[derive(Debug, Default, Clone)]
pub struct FieldWriter {
    buf: Vec<u8>,
}

impl FieldWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Varint field, omitted when zero.
    pub fn uvarint(&mut self, field: u32, value: u64) -> &mut Self {
        if value != 0 {
            write_tag(&mut self.buf, field);
            write_varint(&mut self.buf, value);
        }
        self
    }

    /// Varint field written even when zero.
    pub fn required_uvarint(&mut self, field: u32, value: u64) -> &mut Self {
        write_tag(&mut self.buf, field);
        write_varint(&mut self.buf, value);
        self
    }

    /// Boolean field: varint `1` when true, omitted when false.
    pub fn boolean(&mut self, field: u32, value: bool) -> &mut Self {
        self.uvarint(field, u64::from(value))
    }

    /// String field, omitted when empty.
    pub fn string(&mut self, field: u32, value: &str) -> &mut Self {
        self.bytes(field, value.as_bytes())
    }

    /// String field written even when empty.
    pub fn required_string(&mut self, field: u32, value: &str) -> &mut Self {
        write_tag(&mut self.buf, field);
        write_length_prefixed(&mut self.buf, value.as_bytes());
        self
    }

    /// Optional string field.
    pub fn opt_string(&mut self, field: u32, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) => self.string(field, v),
            None => self,
        }
    }

    /// Byte-string field, omitted when empty. Also used for nested
    /// structures, whose encodings are written as byte strings.
    pub fn bytes(&mut self, field: u32, value: &[u8]) -> &mut Self {
        if !value.is_empty() {
            write_tag(&mut self.buf, field);
            write_length_prefixed(&mut self.buf, value);
        }
        self
    }

    /// Raw 32-byte hash field, omitted when all zero.
    pub fn hash(&mut self, field: u32, value: &[u8; HASH_LENGTH]) -> &mut Self {
        if value.iter().any(|b| *b != 0) {
            write_tag(&mut self.buf, field);
            self.buf.extend_from_slice(value);
        }
        self
    }

    /// Unsigned big integer as minimal big-endian bytes, omitted when zero.
    pub fn big_uint(&mut self, field: u32, value: u128) -> &mut Self {
        let be = value.to_be_bytes();
        let first = be.iter().position(|b| *b != 0).unwrap_or(be.len());
        self.bytes(field, &be[first..])
    }

    /// One varint per element, same field number, input order.
    pub fn repeated_uvarint(&mut self, field: u32, values: impl IntoIterator<Item = u64>) -> &mut Self {
        for value in values {
            write_tag(&mut self.buf, field);
            write_varint(&mut self.buf, value);
        }
        self
    }

    /// One string per element, same field number, input order.
    pub fn repeated_string<S: AsRef<str>>(&mut self, field: u32, values: &[S]) -> &mut Self {
        for value in values {
            write_tag(&mut self.buf, field);
            write_length_prefixed(&mut self.buf, value.as_ref().as_bytes());
        }
        self
    }

    /// One byte string per element, same field number, input order.
    /// Empty elements are still written.
    pub fn repeated_bytes<B: AsRef<[u8]>>(&mut self, field: u32, values: &[B]) -> &mut Self {
        for value in values {
            write_tag(&mut self.buf, field);
            write_length_prefixed(&mut self.buf, value.as_ref());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

// ---------------------------------------------------------------------------
// FieldReader
// ---------------------------------------------------------------------------

/// Reads fields back out of an encoding, in the order the caller asks.
///
/// Each accessor consumes the next field only if it carries the requested
/// number, so absent (elided) fields read as `None`. Anything left after the
/// last known field, such as an epilogue, is available via
/// [`FieldReader::remaining`].
#[derive(Debug, Clone)]
pub struct FieldReader<'a> {
    input: &'a [u8],
}

impl<'a> FieldReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input }
    }

    /// Number of the next field, or `None` at the end of input or when the
    /// next byte cannot start a field (trailing epilogue data).
    pub fn peek_field(&self) -> Option<u32> {
        let mut probe = self.input;
        match read_varint(&mut probe) {
            Ok(n) if (1..=u64::from(MAX_FIELD_NUMBER)).contains(&n) => Some(n as u32),
            _ => None,
        }
    }

    fn enter(&mut self, field: u32) -> Result<bool, CodecError> {
        if self.peek_field() != Some(field) {
            return Ok(false);
        }
        read_varint(&mut self.input)?;
        Ok(true)
    }

    pub fn uvarint(&mut self, field: u32) -> Result<Option<u64>, CodecError> {
        if !self.enter(field)? {
            return Ok(None);
        }
        read_varint(&mut self.input).map(Some)
    }

    pub fn bytes(&mut self, field: u32) -> Result<Option<&'a [u8]>, CodecError> {
        if !self.enter(field)? {
            return Ok(None);
        }
        let len = read_varint(&mut self.input)?;
        let len = usize::try_from(len)
            .map_err(|_| CodecError::malformed(format!("field {field}"), "length overflows usize"))?;
        take(&mut self.input, len, field).map(Some)
    }

    pub fn string(&mut self, field: u32) -> Result<Option<String>, CodecError> {
        match self.bytes(field)? {
            Some(raw) => String::from_utf8(raw.to_vec())
                .map(Some)
                .map_err(|_| CodecError::malformed(format!("field {field}"), "invalid UTF-8")),
            None => Ok(None),
        }
    }

    pub fn hash(&mut self, field: u32) -> Result<Option<[u8; HASH_LENGTH]>, CodecError> {
        if !self.enter(field)? {
            return Ok(None);
        }
        let raw = take(&mut self.input, HASH_LENGTH, field)?;
        let mut out = [0u8; HASH_LENGTH];
        out.copy_from_slice(raw);
        Ok(Some(out))
    }

    pub fn repeated_uvarint(&mut self, field: u32) -> Result<Vec<u64>, CodecError> {
        let mut out = Vec::new();
        while let Some(v) = self.uvarint(field)? {
            out.push(v);
        }
        Ok(out)
    }

    pub fn repeated_bytes(&mut self, field: u32) -> Result<Vec<&'a [u8]>, CodecError> {
        let mut out = Vec::new();
        while let Some(v) = self.bytes(field)? {
            out.push(v);
        }
        Ok(out)
    }

    /// Unconsumed input.
    pub fn remaining(&self) -> &'a [u8] {
        self.input
    }

    /// Fails if any input is left unconsumed.
    pub fn finish(&self) -> Result<(), CodecError> {
        if self.input.is_empty() {
            Ok(())
        } else {
            Err(CodecError::malformed(
                "trailing",
                format!("{} unread bytes", self.input.len()),
            ))
        }
    }
}

fn take<'a>(input: &mut &'a [u8], n: usize, field: u32) -> Result<&'a [u8], CodecError> {
    if input.len() < n {
        return Err(CodecError::malformed(
            format!("field {field}"),
            format!("truncated: need {n} bytes, have {}", input.len()),
        ));
    }
    let (head, tail) = input.split_at(n);
    *input = tail;
    Ok(head)
}

/// Reads one LEB128 varint, advancing `input`.
pub fn read_varint(input: &mut &[u8]) -> Result<u64, CodecError> {
    let mut value: u64 = 0;
    for (i, byte) in input.iter().enumerate() {
        if i >= MAX_VARINT_LENGTH {
            break;
        }
        let group = u64::from(byte & 0x7f);
        if i == MAX_VARINT_LENGTH - 1 && group > 1 {
            return Err(CodecError::malformed("varint", "overflows u64"));
        }
        value |= group << (7 * i);
        if byte & 0x80 == 0 {
            *input = &input[i + 1..];
            return Ok(value);
        }
    }
    Err(CodecError::malformed("varint", "truncated or too long"))
}

//! Text to value.
//!
//! One decoder serves every character width. It consumes the 36 canonical positions in
//! order and stops at the first character that does not belong, so a rejection never
//! reads past the offending character.

use crate::format::{HYPHEN_POSITIONS, TEXT_LEN};
use crate::{malformed, MalformedReason, Uuid, UuidError, UuidResult};

/// Number of hex digits in the unhyphenated form.
const SIMPLE_LEN: usize = 32;

/// A unit of text that can be read as a Unicode code point.
///
/// Implemented for narrow text (`u8`), wide UTF-16 text (`u16`) and code points (`u32`,
/// `char`). Units that are not ASCII can never be part of a UUID, so surrogates and
/// multi-byte sequences need no special handling.
pub trait CodeUnit: Copy {
    fn code_point(self) -> u32;
}

impl CodeUnit for u8 {
    fn code_point(self) -> u32 {
        u32::from(self)
    }
}

impl CodeUnit for u16 {
    fn code_point(self) -> u32 {
        u32::from(self)
    }
}

impl CodeUnit for u32 {
    fn code_point(self) -> u32 {
        self
    }
}

impl CodeUnit for char {
    fn code_point(self) -> u32 {
        u32::from(self)
    }
}

fn hex_value(code_point: u32) -> Option<u8> {
    char::from_u32(code_point)
        .and_then(|c| c.to_digit(16))
        .and_then(|d| u8::try_from(d).ok())
}

/// Incremental decoder for the canonical form.
#[derive(Debug, Default)]
pub(crate) struct Decoder {
    bytes: [u8; 16],
    consumed: usize,
    digits: usize,
}

impl Decoder {
    /// Number of characters accepted so far.
    pub(crate) fn consumed(&self) -> usize {
        self.consumed
    }

    /// Feeds the next character. Returns `Ok(true)` once all 36 have been accepted.
    pub(crate) fn push(&mut self, code_point: u32) -> Result<bool, MalformedReason> {
        if HYPHEN_POSITIONS.contains(&self.consumed) {
            if code_point != u32::from('-') {
                return Err(MalformedReason::ExpectedHyphen);
            }
        } else {
            let nibble = hex_value(code_point).ok_or(MalformedReason::ExpectedHexDigit)?;
            let byte = &mut self.bytes[self.digits / 2];
            if self.digits % 2 == 0 {
                *byte = nibble << 4;
            } else {
                *byte |= nibble;
            }
            self.digits += 1;
        }
        self.consumed += 1;
        Ok(self.consumed == TEXT_LEN)
    }

    pub(crate) fn finish(self) -> Uuid {
        Uuid::from_bytes(self.bytes)
    }
}

/// Decodes the canonical form from the start of `units`, ignoring anything after it.
///
/// On failure returns the offset of the offending unit and the reason.
fn decode_prefix<C: CodeUnit>(units: &[C]) -> Result<Uuid, (usize, MalformedReason)> {
    let mut decoder = Decoder::default();
    for unit in units.iter().take(TEXT_LEN) {
        let position = decoder.consumed();
        decoder
            .push(unit.code_point())
            .map_err(|reason| (position, reason))?;
    }
    if decoder.consumed() < TEXT_LEN {
        return Err((decoder.consumed(), MalformedReason::Truncated));
    }
    Ok(decoder.finish())
}

/// Decodes exactly one canonical form spanning all of `units`.
fn decode_exact<C: CodeUnit>(units: &[C]) -> Result<Uuid, (usize, MalformedReason)> {
    let uuid = decode_prefix(units)?;
    if units.len() > TEXT_LEN {
        return Err((TEXT_LEN, MalformedReason::TrailingInput));
    }
    Ok(uuid)
}

/// Decodes the 32-digit form with no hyphens. `units` must be exactly 32 long.
fn decode_simple<C: CodeUnit>(units: &[C]) -> Result<Uuid, (usize, MalformedReason)> {
    let mut bytes = [0u8; 16];
    for (i, unit) in units.iter().enumerate() {
        let nibble =
            hex_value(unit.code_point()).ok_or((i, MalformedReason::ExpectedHexDigit))?;
        bytes[i / 2] |= if i % 2 == 0 { nibble << 4 } else { nibble };
    }
    Ok(Uuid::from_bytes(bytes))
}

fn decode_permissive<C: CodeUnit>(units: &[C]) -> Result<Uuid, (usize, MalformedReason)> {
    let is = |unit: Option<&C>, c: char| unit.is_some_and(|u| u.code_point() == u32::from(c));

    let opened = is(units.first(), '{');
    let closed = units.len() >= 2 && is(units.last(), '}');
    let (inner, offset) = match (opened, closed) {
        (true, true) => (&units[1..units.len() - 1], 1),
        (false, false) => (units, 0),
        (true, false) => return Err((units.len(), MalformedReason::UnbalancedBrace)),
        (false, true) => return Err((0, MalformedReason::UnbalancedBrace)),
    };

    let decoded = if inner.len() == SIMPLE_LEN {
        decode_simple(inner)
    } else {
        decode_exact(inner)
    };
    decoded.map_err(|(position, reason)| (position + offset, reason))
}

impl Uuid {
    /// Parses a string that must be exactly one canonical UUID.
    ///
    /// Hex digits may be in either case. Braces, surrounding whitespace and trailing
    /// characters are all rejected.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::Malformed`] at the first violation.
    pub fn parse_str(input: &str) -> UuidResult<Self> {
        Self::parse_units(input.as_bytes())
    }

    /// Wide-text counterpart of [`Uuid::parse_str`].
    pub fn from_utf16(input: &[u16]) -> UuidResult<Self> {
        Self::parse_units(input)
    }

    /// Parses a sequence of code units that must be exactly one canonical UUID.
    pub fn parse_units<C: CodeUnit>(units: &[C]) -> UuidResult<Self> {
        decode_exact(units).map_err(|(position, reason)| malformed(position, reason))
    }

    /// Parses the looser forms accepted in configuration and user input.
    ///
    /// Accepted, with hex digits in either case:
    /// - `12345678-90ab-cdef-1234-567890abcdef`
    /// - `1234567890abcdef1234567890abcdef`
    /// - either of the above wrapped in `{` and `}`
    ///
    /// Hyphens must be all present or all absent, and the whole input must be consumed.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::Malformed`] at the first violation.
    pub fn parse_permissive(input: &str) -> UuidResult<Self> {
        decode_permissive(input.as_bytes())
            .map_err(|(position, reason)| malformed(position, reason))
    }

    /// Returns true if `input` is exactly the text [`Uuid::to_text`] would produce for some
    /// value, i.e. a strict parse succeeds and no hex digit is uppercase.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == TEXT_LEN
            && !input.bytes().any(|b| b.is_ascii_uppercase())
            && decode_exact(input.as_bytes()).is_ok()
    }
}

/// A strict stream reader over a slice of text.
///
/// Each [`read_uuid`](TextCursor::read_uuid) consumes exactly 36 characters and leaves
/// the rest for the caller. After a failed read the cursor stays where it was and refuses
/// further reads until [`clear`](TextCursor::clear) is called.
///
/// ```
/// use uuid_text::TextCursor;
///
/// let mut cursor = TextCursor::from("12345678-90ab-cdef-1234-567890abcdef tail");
/// let uuid = cursor.read_uuid().unwrap();
/// assert_eq!(uuid.to_text(), "12345678-90ab-cdef-1234-567890abcdef");
/// assert_eq!(cursor.remaining(), b" tail");
/// ```
#[derive(Clone, Debug)]
pub struct TextCursor<'a, C> {
    units: &'a [C],
    position: usize,
    failed: bool,
}

impl<'a, C: CodeUnit> TextCursor<'a, C> {
    pub fn new(units: &'a [C]) -> Self {
        Self {
            units,
            position: 0,
            failed: false,
        }
    }

    /// Offset of the next unread unit.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The unread units.
    pub fn remaining(&self) -> &'a [C] {
        &self.units[self.position..]
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Resets the failed state so reading can resume at the current position.
    pub fn clear(&mut self) {
        self.failed = false;
    }

    /// Reads one canonical UUID at the current position.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::CursorFailed`] if an earlier read failed and the cursor was not
    /// cleared. Otherwise returns [`UuidError::Malformed`], with a position relative to the
    /// start of the whole text, and marks the cursor failed.
    pub fn read_uuid(&mut self) -> UuidResult<Uuid> {
        if self.failed {
            return Err(UuidError::CursorFailed);
        }
        match decode_prefix(self.remaining()) {
            Ok(uuid) => {
                self.position += TEXT_LEN;
                Ok(uuid)
            }
            Err((offset, reason)) => {
                self.failed = true;
                Err(malformed(self.position + offset, reason))
            }
        }
    }

    /// Advances past any whitespace and returns how many units were skipped.
    pub fn skip_whitespace(&mut self) -> usize {
        let skipped = self
            .remaining()
            .iter()
            .take_while(|unit| {
                char::from_u32(unit.code_point()).is_some_and(char::is_whitespace)
            })
            .count();
        self.position += skipped;
        skipped
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.units.len()
    }
}

impl<'a> From<&'a str> for TextCursor<'a, u8> {
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

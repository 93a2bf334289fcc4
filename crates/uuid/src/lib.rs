//! Canonical UUID text codec.
//!
//! Converts a 16-byte identifier to and from its canonical hyphenated text form:
//! **32 lowercase hexadecimal digits grouped 8-4-4-4-12**.
//!
//! This crate provides:
//! - A value type ([`Uuid`]) holding the 16 raw bytes.
//! - A total formatter with per-call padding options ([`FormatOptions`]).
//! - A strict stream parser ([`TextCursor`], [`read_uuid`]) and a strict whole-string
//!   conversion ([`Uuid::parse_str`]).
//! - A looser conversion ([`Uuid::parse_permissive`]) that also accepts braces and the
//!   unhyphenated form.
//!
//! ## Canonical UUID form
//! - Length: 36
//! - Hyphens at indices 8, 13, 18 and 23
//! - Every other character in `0-9` and `a-f`
//! - Example: `12345678-90ab-cdef-1234-567890abcdef`
//!
//! Notes:
//! - Formatting always emits lowercase. Parsing accepts either case.
//! - The strict parsers reject any decoration (braces, surrounding whitespace).
//! - Narrow (`u8`), wide (`u16`) and code point (`char`, `u32`) text are all parsed by the
//!   same routine through the [`CodeUnit`] trait.
//!
//! ## Strict parsers
//!
//! - **Stream** ([`TextCursor::read_uuid`], [`read_uuid`]): reads exactly 36 characters and
//!   leaves whatever follows for the caller.
//! - **Whole string** ([`Uuid::parse_str`], [`FromStr`](std::str::FromStr)): the input must be
//!   exactly one canonical string; trailing characters are an error.

mod format;
mod io;
mod parse;
mod value;

// Re-export public types
pub use format::{Align, FormatOptions, Padded, HYPHEN_POSITIONS, MAX_WIDTH, TEXT_LEN};
pub use io::{read_uuid, write_uuid};
pub use parse::{CodeUnit, TextCursor};
pub use value::Uuid;

/// Why a piece of text was rejected as a UUID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    /// Input ended before 36 characters were read.
    #[error("input ended before 36 characters")]
    Truncated,
    /// A hyphen was required at this position.
    #[error("expected '-'")]
    ExpectedHyphen,
    /// A hexadecimal digit was required at this position.
    #[error("expected a hexadecimal digit")]
    ExpectedHexDigit,
    /// Characters remain after a complete identifier.
    #[error("unexpected trailing input")]
    TrailingInput,
    /// An opening or closing brace has no partner.
    #[error("unbalanced brace")]
    UnbalancedBrace,
}

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Text is not a valid UUID.
    #[error("malformed UUID text at position {position}: {reason}")]
    Malformed {
        position: usize,
        reason: MalformedReason,
    },
    /// A byte slice did not hold exactly 16 bytes.
    #[error("expected 16 bytes, got {0}")]
    InvalidLength(usize),
    /// Caller supplied padding options that cannot be applied.
    #[error("invalid format options: {0}")]
    InvalidFormatOptions(String),
    /// A previous read on this cursor failed and it has not been cleared.
    #[error("text cursor is in a failed state")]
    CursorFailed,
    /// The text sink refused a write.
    #[error("failed to write UUID text: {0}")]
    Fmt(#[from] std::fmt::Error),
    /// The underlying reader or writer failed.
    #[error("UUID stream I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl UuidError {
    /// Returns the rejection reason if this is a malformed-text error.
    pub fn malformed_reason(&self) -> Option<MalformedReason> {
        match self {
            UuidError::Malformed { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;

/// Builds a [`UuidError::Malformed`], recording the rejection for diagnostics.
pub(crate) fn malformed(position: usize, reason: MalformedReason) -> UuidError {
    tracing::debug!(position, %reason, "rejected UUID text");
    UuidError::Malformed { position, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_and_stream_errors_convert() {
        let err = UuidError::from(std::fmt::Error);
        assert!(matches!(err, UuidError::Fmt(_)));
        assert!(err.to_string().starts_with("failed to write UUID text"));
        assert_eq!(err.malformed_reason(), None);

        let err = UuidError::from(std::io::Error::new(std::io::ErrorKind::Other, "closed"));
        match &err {
            UuidError::Io(inner) => assert_eq!(inner.to_string(), "closed"),
            other => panic!("Expected Io error, got {:?}", other),
        }
        assert_eq!(err.to_string(), "UUID stream I/O failed: closed");
    }
}

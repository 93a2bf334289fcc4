//! Reading and writing UUID text over `std::io` streams.

use crate::parse::Decoder;
use crate::{malformed, FormatOptions, MalformedReason, Uuid, UuidResult};
use std::io::{self, BufRead, Write};

/// Reads one canonical UUID from `reader`.
///
/// Bytes are consumed only once they have been validated. On a malformed byte the reader
/// is left positioned at that byte, so nothing past the first violation is consumed.
/// Anything after the 36th character is left unread.
///
/// # Errors
///
/// Returns [`UuidError::Malformed`](crate::UuidError::Malformed) for invalid text,
/// including end of input before 36 characters (reason
/// [`MalformedReason::Truncated`]), and [`UuidError::Io`](crate::UuidError::Io) if the
/// reader fails.
pub fn read_uuid<R: BufRead + ?Sized>(reader: &mut R) -> UuidResult<Uuid> {
    let mut decoder = Decoder::default();
    loop {
        let available = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if available.is_empty() {
            return Err(malformed(decoder.consumed(), MalformedReason::Truncated));
        }

        let mut used = 0;
        let mut outcome = None;
        for &byte in available {
            let position = decoder.consumed();
            match decoder.push(u32::from(byte)) {
                Ok(complete) => {
                    used += 1;
                    if complete {
                        outcome = Some(Ok(()));
                        break;
                    }
                }
                Err(reason) => {
                    outcome = Some(Err((position, reason)));
                    break;
                }
            }
        }
        reader.consume(used);

        match outcome {
            Some(Ok(())) => return Ok(decoder.finish()),
            Some(Err((position, reason))) => return Err(malformed(position, reason)),
            None => {}
        }
    }
}

/// Writes `uuid` to `writer` in canonical form, padded according to `options`.
///
/// # Errors
///
/// Returns [`UuidError::InvalidFormatOptions`](crate::UuidError::InvalidFormatOptions) for
/// invalid options and [`UuidError::Io`](crate::UuidError::Io) if the write fails.
pub fn write_uuid<W: Write + ?Sized>(
    writer: &mut W,
    uuid: &Uuid,
    options: &FormatOptions,
) -> UuidResult<()> {
    let text = uuid.format_with(options)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Align, UuidError};
    use std::io::{BufReader, Cursor, Read};

    const MIXED_TEXT: &str = "12345678-90ab-cdef-1234-567890abcdef";

    #[test]
    fn test_read_uuid_leaves_trailing_bytes() {
        let mut reader = Cursor::new(format!("{}rest", MIXED_TEXT).into_bytes());
        let uuid = read_uuid(&mut reader).unwrap();
        assert_eq!(uuid.to_text(), MIXED_TEXT);

        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "rest");
    }

    #[test]
    fn test_read_uuid_across_small_buffers() {
        // A 3-byte buffer forces many fill_buf calls.
        let inner = Cursor::new(MIXED_TEXT.to_ascii_uppercase().into_bytes());
        let mut reader = BufReader::with_capacity(3, inner);
        let uuid = read_uuid(&mut reader).unwrap();
        assert_eq!(uuid.to_text(), MIXED_TEXT);
    }

    #[test]
    fn test_read_uuid_stops_at_first_invalid_byte() {
        let mut reader = Cursor::new(b"01234567-89ab-cdef0123-456789abcdef".to_vec());
        match read_uuid(&mut reader) {
            Err(UuidError::Malformed { position, reason }) => {
                assert_eq!(position, 18);
                assert_eq!(reason, MalformedReason::ExpectedHyphen);
            }
            other => panic!("Expected Malformed error, got {:?}", other),
        }
        assert_eq!(reader.position(), 18);
    }

    #[test]
    fn test_read_uuid_truncated() {
        let mut reader = Cursor::new(b"12345678-90ab".to_vec());
        let err = read_uuid(&mut reader).unwrap_err();
        assert_eq!(err.malformed_reason(), Some(MalformedReason::Truncated));
    }

    #[test]
    fn test_read_uuid_rejects_braces() {
        let mut reader = Cursor::new(b"{12345678-90ab-cdef-1234-567890abcdef}".to_vec());
        assert!(read_uuid(&mut reader).is_err());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_uuid_reports_io_failure() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
            }
        }

        let mut reader = BufReader::new(Broken);
        assert!(matches!(read_uuid(&mut reader), Err(UuidError::Io(_))));
    }

    #[test]
    fn test_write_uuid_with_padding() {
        let mut out = vec![b'a'];
        let options = FormatOptions::new()
            .with_width(40)
            .with_fill('*')
            .with_align(Align::Right);
        write_uuid(&mut out, &Uuid::nil(), &options).unwrap();
        out.push(b'a');
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "a****00000000-0000-0000-0000-000000000000a"
        );
    }

    #[test]
    fn test_write_then_read() {
        let uuid: Uuid = MIXED_TEXT.parse().unwrap();
        let mut out = Vec::new();
        write_uuid(&mut out, &uuid, &FormatOptions::default()).unwrap();
        assert_eq!(read_uuid(&mut out.as_slice()).unwrap(), uuid);
    }
}

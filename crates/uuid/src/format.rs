//! Value to text.
//!
//! Formatting is total: every 16-byte value has exactly one canonical form. Padding is
//! applied around the 36 characters and never changes them.

use crate::{Uuid, UuidError, UuidResult};
use std::fmt::{self, Write};

/// Length of the canonical text form.
pub const TEXT_LEN: usize = 36;

/// String indices of the four hyphens in the canonical form.
pub const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// Largest field width accepted by [`FormatOptions::validate`].
pub const MAX_WIDTH: usize = 4096;

const LOWER_HEX: &[u8; 16] = b"0123456789abcdef";

/// Which side of the field the identifier sits on when padding is added.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    /// Identifier first, padding after.
    Left,
    /// Padding first, identifier after.
    #[default]
    Right,
}

/// Per-call field formatting for the canonical form.
///
/// The options are an immutable value passed with each call, so nothing carries over
/// from one formatting call to the next.
///
/// ```
/// use uuid_text::{Align, FormatOptions, Uuid};
///
/// let options = FormatOptions::new().with_width(40).with_fill('*');
/// assert_eq!(
///     Uuid::nil().format_with(&options).unwrap(),
///     "****00000000-0000-0000-0000-000000000000"
/// );
/// assert_eq!(options.with_align(Align::Left).align(), Align::Left);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    width: usize,
    fill: char,
    align: Align,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatOptions {
    /// No padding: width 0, space fill, right alignment.
    pub const fn new() -> Self {
        Self {
            width: 0,
            fill: ' ',
            align: Align::Right,
        }
    }

    pub const fn with_width(self, width: usize) -> Self {
        Self { width, ..self }
    }

    pub const fn with_fill(self, fill: char) -> Self {
        Self { fill, ..self }
    }

    pub const fn with_align(self, align: Align) -> Self {
        Self { align, ..self }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn fill(&self) -> char {
        self.fill
    }

    pub fn align(&self) -> Align {
        self.align
    }

    /// Checks that the options can be applied.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidFormatOptions`] if the fill character is a control
    /// character or the width exceeds [`MAX_WIDTH`].
    pub fn validate(&self) -> UuidResult<()> {
        if self.fill.is_control() {
            return Err(UuidError::InvalidFormatOptions(format!(
                "fill must be a printable character, got {:?}",
                self.fill
            )));
        }
        if self.width > MAX_WIDTH {
            return Err(UuidError::InvalidFormatOptions(format!(
                "width must be at most {}, got {}",
                MAX_WIDTH, self.width
            )));
        }
        Ok(())
    }

    /// Number of fill characters before and after the identifier.
    fn padding(&self) -> (usize, usize) {
        let pad = self.width.saturating_sub(TEXT_LEN);
        match self.align {
            Align::Left => (0, pad),
            Align::Right => (pad, 0),
        }
    }
}

/// A [`Uuid`] paired with validated [`FormatOptions`], for use with `format!` and `write!`.
///
/// Created by [`Uuid::padded`]. Any width, fill or alignment given in the format string
/// itself is ignored in favour of the stored options.
#[derive(Clone, Copy, Debug)]
pub struct Padded {
    uuid: Uuid,
    options: FormatOptions,
}

impl fmt::Display for Padded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (pre, post) = self.options.padding();
        write_field(f, &self.uuid, self.options.fill, pre, post)
    }
}

impl Uuid {
    /// Writes the canonical lowercase form into `buf` and returns it as a `&str`.
    pub fn encode_lower<'b>(&self, buf: &'b mut [u8; TEXT_LEN]) -> &'b str {
        let mut out = 0;
        for (i, byte) in self.as_bytes().iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                buf[out] = b'-';
                out += 1;
            }
            buf[out] = LOWER_HEX[usize::from(byte >> 4)];
            buf[out + 1] = LOWER_HEX[usize::from(byte & 0x0f)];
            out += 2;
        }
        std::str::from_utf8(buf).expect("hex digits and hyphens are ASCII")
    }

    /// Returns the canonical form with no padding.
    pub fn to_text(&self) -> String {
        let mut buf = [0u8; TEXT_LEN];
        self.encode_lower(&mut buf).to_owned()
    }

    /// Returns the canonical form as UTF-16 code units.
    pub fn to_utf16(&self) -> Vec<u16> {
        let mut buf = [0u8; TEXT_LEN];
        self.encode_lower(&mut buf).encode_utf16().collect()
    }

    /// Returns the canonical form padded according to `options`.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidFormatOptions`] if `options` fails validation.
    pub fn format_with(&self, options: &FormatOptions) -> UuidResult<String> {
        let mut out = String::with_capacity(options.width.max(TEXT_LEN));
        self.write_with(&mut out, options)?;
        Ok(out)
    }

    /// Writes the canonical form, padded according to `options`, into `out`.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidFormatOptions`] for invalid options and
    /// [`UuidError::Fmt`] if the sink refuses the write.
    pub fn write_with<W: Write + ?Sized>(
        &self,
        out: &mut W,
        options: &FormatOptions,
    ) -> UuidResult<()> {
        options.validate()?;
        let (pre, post) = options.padding();
        write_field(out, self, options.fill, pre, post)?;
        Ok(())
    }

    /// Pairs this value with `options` for use in `format!`/`write!`.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidFormatOptions`] if `options` fails validation.
    pub fn padded(&self, options: &FormatOptions) -> UuidResult<Padded> {
        options.validate()?;
        Ok(Padded {
            uuid: *self,
            options: *options,
        })
    }
}

impl fmt::Display for Uuid {
    /// Formats the canonical form, honouring the width, fill and alignment of the format
    /// string.
    ///
    /// Without an explicit alignment the identifier is right-aligned. Precision is ignored;
    /// the 36 characters are never truncated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pad = f.width().unwrap_or(0).saturating_sub(TEXT_LEN);
        let (pre, post) = match f.align() {
            Some(fmt::Alignment::Left) => (0, pad),
            Some(fmt::Alignment::Center) => (pad / 2, pad - pad / 2),
            Some(fmt::Alignment::Right) | None => (pad, 0),
        };
        let fill = f.fill();
        write_field(f, self, fill, pre, post)
    }
}

fn write_field<W: Write + ?Sized>(
    out: &mut W,
    uuid: &Uuid,
    fill: char,
    pre: usize,
    post: usize,
) -> fmt::Result {
    let mut buf = [0u8; TEXT_LEN];
    for _ in 0..pre {
        out.write_char(fill)?;
    }
    out.write_str(uuid.encode_lower(&mut buf))?;
    for _ in 0..post {
        out.write_char(fill)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NIL_TEXT: &str = "00000000-0000-0000-0000-000000000000";

    fn sequential() -> Uuid {
        Uuid::from_bytes([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15])
    }

    fn mixed() -> Uuid {
        Uuid::from_bytes([
            0x12, 0x34, 0x56, 0x78, 0x90, 0xab, 0xcd, 0xef, 0x12, 0x34, 0x56, 0x78, 0x90, 0xab,
            0xcd, 0xef,
        ])
    }

    #[test]
    fn test_to_text_literal_examples() {
        assert_eq!(Uuid::nil().to_text(), NIL_TEXT);
        assert_eq!(sequential().to_text(), "00010203-0405-0607-0809-0a0b0c0d0e0f");
        assert_eq!(mixed().to_text(), "12345678-90ab-cdef-1234-567890abcdef");
    }

    #[test]
    fn test_canonical_shape() {
        let samples = [
            Uuid::nil(),
            sequential(),
            mixed(),
            Uuid::from_bytes([0xff; 16]),
            Uuid::from_bytes([0xa5; 16]),
        ];

        for uuid in samples {
            let text = uuid.to_text();
            assert_eq!(text.len(), TEXT_LEN);
            for (i, c) in text.chars().enumerate() {
                if HYPHEN_POSITIONS.contains(&i) {
                    assert_eq!(c, '-', "index {} of {}", i, text);
                } else {
                    assert!(matches!(c, '0'..='9' | 'a'..='f'), "index {} of {}", i, text);
                }
            }
        }
    }

    #[test]
    fn test_matches_ecosystem_hyphenated_form() {
        for uuid in [sequential(), mixed(), Uuid::from_bytes([0xff; 16])] {
            let external: ::uuid::Uuid = uuid.into();
            assert_eq!(uuid.to_text(), external.hyphenated().to_string());
        }
    }

    #[test]
    fn test_to_utf16() {
        let expected: Vec<u16> = "12345678-90ab-cdef-1234-567890abcdef"
            .encode_utf16()
            .collect();
        assert_eq!(mixed().to_utf16(), expected);
    }

    #[test]
    fn test_display_without_width() {
        assert_eq!(format!("{}", mixed()), "12345678-90ab-cdef-1234-567890abcdef");
    }

    #[test]
    fn test_display_right_aligned_with_fill_between_text() {
        let out = format!("a{:*>40}a", Uuid::nil());
        assert_eq!(out, "a****00000000-0000-0000-0000-000000000000a");
    }

    #[test]
    fn test_display_left_aligned() {
        assert_eq!(
            format!("{:*<45}", Uuid::nil()),
            "00000000-0000-0000-0000-000000000000*********"
        );
        assert_eq!(
            format!("{:*<45}", sequential()),
            "00010203-0405-0607-0809-0a0b0c0d0e0f*********"
        );
    }

    #[test]
    fn test_display_defaults_to_right_alignment() {
        assert_eq!(format!("{:38}", Uuid::nil()), format!("  {}", NIL_TEXT));
    }

    #[test]
    fn test_display_center_alignment() {
        assert_eq!(format!("{:-^39}", Uuid::nil()), format!("-{}--", NIL_TEXT));
    }

    #[test]
    fn test_display_narrow_width_and_precision_do_not_truncate() {
        assert_eq!(format!("{:10}", Uuid::nil()), NIL_TEXT);
        assert_eq!(format!("{:.4}", Uuid::nil()), NIL_TEXT);
    }

    #[test]
    fn test_display_padding_is_not_sticky() {
        let out = format!("{:*>40}|{}", Uuid::nil(), Uuid::nil());
        assert_eq!(out, format!("****{}|{}", NIL_TEXT, NIL_TEXT));
    }

    #[test]
    fn test_format_with_right_alignment() {
        let options = FormatOptions::new()
            .with_width(40)
            .with_fill('*')
            .with_align(Align::Right);
        assert_eq!(
            Uuid::nil().format_with(&options).unwrap(),
            format!("****{}", NIL_TEXT)
        );
    }

    #[test]
    fn test_format_with_left_alignment() {
        let options = FormatOptions::new()
            .with_width(45)
            .with_fill('*')
            .with_align(Align::Left);
        assert_eq!(
            sequential().format_with(&options).unwrap(),
            "00010203-0405-0607-0809-0a0b0c0d0e0f*********"
        );
    }

    #[test]
    fn test_format_with_width_at_or_below_text_len() {
        for width in [0, 1, 35, 36] {
            let options = FormatOptions::new().with_width(width).with_fill('*');
            assert_eq!(Uuid::nil().format_with(&options).unwrap(), NIL_TEXT);
        }
    }

    #[test]
    fn test_format_with_multibyte_fill() {
        let options = FormatOptions::new().with_width(38).with_fill('é');
        assert_eq!(
            Uuid::nil().format_with(&options).unwrap(),
            format!("éé{}", NIL_TEXT)
        );
    }

    #[test]
    fn test_default_options() {
        let options = FormatOptions::default();
        assert_eq!(options.width(), 0);
        assert_eq!(options.fill(), ' ');
        assert_eq!(options.align(), Align::Right);
        assert_eq!(mixed().format_with(&options).unwrap(), mixed().to_text());
    }

    #[test]
    fn test_validate_rejects_control_fill() {
        let options = FormatOptions::new().with_fill('\n');
        match Uuid::nil().format_with(&options) {
            Err(UuidError::InvalidFormatOptions(msg)) => {
                assert!(msg.contains("printable"));
            }
            other => panic!("Expected InvalidFormatOptions, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_excessive_width() {
        let options = FormatOptions::new().with_width(MAX_WIDTH + 1);
        assert!(options.validate().is_err());
        assert!(FormatOptions::new().with_width(MAX_WIDTH).validate().is_ok());
    }

    #[test]
    fn test_write_with_appends_to_existing_text() {
        let mut out = String::from("id=");
        let options = FormatOptions::new().with_width(37).with_align(Align::Left);
        mixed().write_with(&mut out, &options).unwrap();
        assert_eq!(out, "id=12345678-90ab-cdef-1234-567890abcdef ");
    }

    #[test]
    fn test_padded_ignores_format_string_flags() {
        let options = FormatOptions::new().with_width(40).with_fill('#');
        let padded = Uuid::nil().padded(&options).unwrap();
        assert_eq!(format!("{:<60}", padded), format!("####{}", NIL_TEXT));
    }

    #[test]
    fn test_padded_rejects_invalid_options() {
        let options = FormatOptions::new().with_fill('\0');
        assert!(Uuid::nil().padded(&options).is_err());
    }
}

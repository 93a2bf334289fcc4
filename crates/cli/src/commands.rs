//! Command implementations.
//!
//! Each command writes to a caller-supplied sink so it can be driven from tests as well as
//! from `main`.

use anyhow::{bail, Context};
use std::io::{self, BufRead, Write};
use uuid_text::{read_uuid, write_uuid, FormatOptions, Uuid, UuidError};

/// Outcome of a line-by-line `check`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub valid: usize,
    pub invalid: usize,
}

/// Prints `input`, accepted in any of the permissive forms, in canonical form.
pub fn format<W: Write>(
    input: &str,
    options: &FormatOptions,
    out: &mut W,
) -> anyhow::Result<()> {
    let uuid = Uuid::parse_permissive(input.trim())
        .with_context(|| format!("cannot read '{}' as a UUID", input))?;
    write_uuid(out, &uuid, options)?;
    writeln!(out)?;
    Ok(())
}

/// Strictly parses `input` and prints its 16 bytes as comma-separated hex.
pub fn parse<W: Write>(input: &str, out: &mut W) -> anyhow::Result<()> {
    let uuid = Uuid::parse_str(input)
        .with_context(|| format!("'{}' is not a canonical UUID", input))?;
    let bytes: Vec<String> = uuid.as_bytes().iter().map(|b| format!("{:02x}", b)).collect();
    writeln!(out, "{}", bytes.join(","))?;
    Ok(())
}

/// Builds a UUID from comma-separated hex bytes and prints it in canonical form.
///
/// Each byte is one or two hex digits, optionally prefixed once with `0x`.
pub fn from_bytes<W: Write>(
    input: &str,
    options: &FormatOptions,
    out: &mut W,
) -> anyhow::Result<()> {
    let bytes = input
        .split(',')
        .map(parse_hex_byte)
        .collect::<anyhow::Result<Vec<u8>>>()?;
    let uuid = Uuid::from_slice(&bytes)?;
    write_uuid(out, &uuid, options)?;
    writeln!(out)?;
    Ok(())
}

fn parse_hex_byte(part: &str) -> anyhow::Result<u8> {
    let part = part.trim();
    let digits = part.strip_prefix("0x").unwrap_or(part);
    if !(1..=2).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        bail!("'{}' is not a hex byte", part);
    }
    u8::from_str_radix(digits, 16).with_context(|| format!("'{}' is not a hex byte", part))
}

/// Strictly parses every non-empty line of `reader`, reporting each result to `out`.
///
/// Lines are checked as raw bytes, so a line that is not UTF-8 is reported as malformed
/// rather than stopping the check.
pub fn check<R: BufRead, W: Write>(reader: R, out: &mut W) -> anyhow::Result<CheckSummary> {
    let mut summary = CheckSummary::default();
    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line.context("failed to read input line")?;
        let candidate = line.trim_ascii();
        if candidate.is_empty() {
            continue;
        }
        match Uuid::parse_units(candidate) {
            Ok(uuid) => {
                summary.valid += 1;
                writeln!(out, "ok {}", uuid)?;
            }
            Err(e) => {
                summary.invalid += 1;
                writeln!(out, "error line {}: {}", index + 1, e)?;
            }
        }
    }
    tracing::info!(valid = summary.valid, invalid = summary.invalid, "check finished");
    Ok(summary)
}

/// Reads whitespace-separated UUIDs from `reader` with the stream parser and prints each
/// in canonical form. Stops at the first malformed identifier.
///
/// Returns the number of identifiers read.
pub fn scan<R: BufRead, W: Write>(
    mut reader: R,
    options: &FormatOptions,
    out: &mut W,
) -> anyhow::Result<usize> {
    let mut offset = skip_whitespace(&mut reader)?;
    let mut count = 0;
    while !reader.fill_buf()?.is_empty() {
        match read_uuid(&mut reader) {
            Ok(uuid) => {
                write_uuid(out, &uuid, options)?;
                writeln!(out)?;
                count += 1;
                offset += uuid_text::TEXT_LEN;
            }
            Err(UuidError::Malformed { position, reason }) => {
                bail!(
                    "malformed UUID at byte {}: {} (after {} valid)",
                    offset + position,
                    reason,
                    count
                );
            }
            Err(e) => return Err(e.into()),
        }
        offset += skip_whitespace(&mut reader)?;
    }
    Ok(count)
}

/// Consumes leading ASCII whitespace and returns how many bytes were skipped.
fn skip_whitespace<R: BufRead>(reader: &mut R) -> io::Result<usize> {
    let mut skipped = 0;
    loop {
        let available = reader.fill_buf()?;
        let run = available
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        let exhausted = run < available.len() || available.is_empty();
        reader.consume(run);
        skipped += run;
        if exhausted {
            return Ok(skipped);
        }
    }
}

//! CLI runtime configuration.
//!
//! Output layout is resolved once at startup from environment values and command-line
//! flags, then passed into the commands. Resolution functions take the raw values as
//! arguments rather than reading the environment, so commands never consult process-wide
//! state while running.

use uuid_text::{Align, FormatOptions, UuidError};

/// Field width for formatted output.
pub const WIDTH_ENV: &str = "UUIDTXT_WIDTH";
/// Fill character for formatted output.
pub const FILL_ENV: &str = "UUIDTXT_FILL";
/// `left` or `right`.
pub const ALIGN_ENV: &str = "UUIDTXT_ALIGN";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidWidth { var: &'static str, value: String },
    #[error("{var} must be exactly one character, got '{value}'")]
    InvalidFill { var: &'static str, value: String },
    #[error("{var} must be 'left' or 'right', got '{value}'")]
    InvalidAlign { var: &'static str, value: String },
    #[error(transparent)]
    Options(#[from] UuidError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Layout values given on the command line. Each one overrides its environment variable.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayoutOverrides {
    pub width: Option<usize>,
    pub fill: Option<char>,
    pub align: Option<Align>,
}

/// Configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CliConfig {
    format_options: FormatOptions,
}

impl CliConfig {
    /// Create a new `CliConfig`, rejecting options the formatter cannot apply.
    pub fn new(format_options: FormatOptions) -> ConfigResult<Self> {
        format_options.validate()?;
        Ok(Self { format_options })
    }

    /// Resolve from raw environment values, with `overrides` taking precedence.
    pub fn resolve(
        width: Option<String>,
        fill: Option<String>,
        align: Option<String>,
        overrides: LayoutOverrides,
    ) -> ConfigResult<Self> {
        let mut options = FormatOptions::new();

        let width = match overrides.width {
            Some(width) => Some(width),
            None => width_from_env_value(width)?,
        };
        let fill = match overrides.fill {
            Some(fill) => Some(fill),
            None => fill_from_env_value(fill)?,
        };
        let align = match overrides.align {
            Some(align) => Some(align),
            None => align_from_env_value(align)?,
        };

        if let Some(width) = width {
            options = options.with_width(width);
        }
        if let Some(fill) = fill {
            options = options.with_fill(fill);
        }
        if let Some(align) = align {
            options = options.with_align(align);
        }

        Self::new(options)
    }

    pub fn format_options(&self) -> &FormatOptions {
        &self.format_options
    }
}

/// Drops unset, empty and whitespace-only values.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the field width from an optional environment value.
pub fn width_from_env_value(value: Option<String>) -> ConfigResult<Option<usize>> {
    non_empty(value)
        .map(|v| {
            v.parse::<usize>().map_err(|_| ConfigError::InvalidWidth {
                var: WIDTH_ENV,
                value: v,
            })
        })
        .transpose()
}

/// Parse the fill character from an optional environment value.
///
/// Unlike the other values this is not trimmed, so a single space can be configured.
pub fn fill_from_env_value(value: Option<String>) -> ConfigResult<Option<char>> {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Some(c)),
        _ => Err(ConfigError::InvalidFill {
            var: FILL_ENV,
            value,
        }),
    }
}

/// Parse the alignment from an optional environment value.
pub fn align_from_env_value(value: Option<String>) -> ConfigResult<Option<Align>> {
    non_empty(value)
        .map(|v| match v.to_ascii_lowercase().as_str() {
            "left" => Ok(Align::Left),
            "right" => Ok(Align::Right),
            _ => Err(ConfigError::InvalidAlign {
                var: ALIGN_ENV,
                value: v,
            }),
        })
        .transpose()
}

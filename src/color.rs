//! Hex color parsing and greyscale weighting.
//!
//! Shared helpers for working with `#rrggbb` color strings.

use crate::error::{MinardError, Result};

/// Parse a `#rrggbb` color string into an RGB triple
pub fn parse_hex_rgb(color: &str) -> Result<[u8; 3]> {
    let hex = color.strip_prefix('#').ok_or_else(|| MinardError::InvalidColor {
        color: color.to_string(),
        message: "expected leading '#'".to_string(),
    })?;
    if hex.len() != 6 {
        return Err(MinardError::InvalidColor {
            color: color.to_string(),
            message: format!("expected 6 hex digits, got {}", hex.len()),
        });
    }

    let parse_pair = |s: &str| {
        u8::from_str_radix(s, 16).map_err(|_| MinardError::InvalidColor {
            color: color.to_string(),
            message: format!("'{}' is not a hex byte", s),
        })
    };

    Ok([
        parse_pair(&hex[0..2])?,
        parse_pair(&hex[2..4])?,
        parse_pair(&hex[4..6])?,
    ])
}

/// Greyscale weight of a color, normalized to [0, 1).
///
/// Uses the standard luma coefficients (0.299, 0.587, 0.114).
pub fn greyscale(rgb: [u8; 3]) -> f64 {
    (0.299 * rgb[0] as f64 + 0.587 * rgb[1] as f64 + 0.114 * rgb[2] as f64) / 256.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_rgb() {
        assert_eq!(parse_hex_rgb("#ffffff").unwrap(), [255, 255, 255]);
        assert_eq!(parse_hex_rgb("#000000").unwrap(), [0, 0, 0]);
        assert_eq!(parse_hex_rgb("#1a2b3c").unwrap(), [0x1a, 0x2b, 0x3c]);
    }

    #[test]
    fn test_parse_hex_rgb_rejects_malformed() {
        assert!(parse_hex_rgb("ffffff").is_err());
        assert!(parse_hex_rgb("#fff").is_err());
        assert!(parse_hex_rgb("#gggggg").is_err());
    }

    #[test]
    fn test_greyscale_extremes() {
        assert!(greyscale([0, 0, 0]) < 0.001);
        let white = greyscale([255, 255, 255]);
        assert!(white > 0.99 && white < 1.0);
    }
}

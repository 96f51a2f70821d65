use std::fmt;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use thiserror::Error;

/// Standard alphabet, padding optional. Players routinely drop the `=`.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encodings understood by `decode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// RFC 4648 standard alphabet.
    Base64,
    /// Pairs of hexadecimal digits.
    Hex,
}

impl Encoding {
    /// Parse the encoding token. Matching is exact: `base64` or `hex`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "base64" => Some(Self::Base64),
            "hex" => Some(Self::Hex),
            _ => None,
        }
    }

    /// Label used in `Decoded (<label>): ...` output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Base64 => "Base64",
            Self::Hex => "Hex",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The payload is not valid for the requested encoding.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Characters outside the Base64 alphabet, or an impossible length.
    #[error("Error: Invalid Base64 string.")]
    InvalidBase64,
    /// Odd length or a non-hex digit.
    #[error("Error: Invalid Hex string.")]
    InvalidHex,
}

/// Decode `payload` to text. Bytes that are not UTF-8 are replaced with
/// U+FFFD rather than rejected: a valid encoding of binary data is still a
/// valid encoding.
pub fn decode(encoding: Encoding, payload: &str) -> Result<String, DecodeError> {
    let bytes = match encoding {
        Encoding::Base64 => LENIENT_BASE64
            .decode(payload)
            .map_err(|_| DecodeError::InvalidBase64)?,
        Encoding::Hex => decode_hex(payload)?,
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn decode_hex(payload: &str) -> Result<Vec<u8>, DecodeError> {
    let digits = payload.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(DecodeError::InvalidHex);
    }
    digits
        .chunks(2)
        .map(|pair| {
            let hi = hex_value(pair[0])?;
            let lo = hex_value(pair[1])?;
            Ok((hi << 4) | lo)
        })
        .collect()
}

fn hex_value(digit: u8) -> Result<u8, DecodeError> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(DecodeError::InvalidHex),
    }
}

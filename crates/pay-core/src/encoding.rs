//! # Payload Encoding
//!
//! Transport encoding applied to the Apple Pay payment token before it is
//! placed in `encryptedData`. Which variant a deployment needs is dictated
//! by the processor's token format, so the encoding is selected by
//! configuration rather than fixed in code.

use crate::error::PaymentError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the Apple Pay payload is encoded into `encrypted_data`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadEncoding {
    /// Hex of the payload's UTF-8 bytes
    #[default]
    Hex,

    /// Payload forwarded unchanged as an opaque token string
    Opaque,
}

impl PayloadEncoding {
    /// Apply this encoding to a serialized Apple Pay payment token
    pub fn encode(&self, payload: &str) -> String {
        match self {
            PayloadEncoding::Hex => hex::encode(payload.as_bytes()),
            PayloadEncoding::Opaque => payload.to_string(),
        }
    }

    /// Name used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadEncoding::Hex => "hex",
            PayloadEncoding::Opaque => "opaque",
        }
    }
}

impl FromStr for PayloadEncoding {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(PayloadEncoding::Hex),
            "opaque" => Ok(PayloadEncoding::Opaque),
            other => Err(PaymentError::Configuration(format!(
                "Unknown payload encoding: {} (expected 'hex' or 'opaque')",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_encoding_matches_utf8_bytes() {
        assert_eq!(PayloadEncoding::Hex.encode("abc"), "616263");
        assert_eq!(
            PayloadEncoding::Hex.encode("payload"),
            hex::encode("payload".as_bytes())
        );
    }

    #[test]
    fn test_hex_encoding_multibyte() {
        // "é" is 0xC3 0xA9 in UTF-8
        assert_eq!(PayloadEncoding::Hex.encode("é"), "c3a9");
    }

    #[test]
    fn test_opaque_forwards_unchanged() {
        let token = r#"{"paymentData":{"version":"EC_v1"}}"#;
        assert_eq!(PayloadEncoding::Opaque.encode(token), token);
    }

    #[test]
    fn test_parse_from_config_value() {
        assert_eq!(
            "hex".parse::<PayloadEncoding>().unwrap(),
            PayloadEncoding::Hex
        );
        assert_eq!(
            "Opaque".parse::<PayloadEncoding>().unwrap(),
            PayloadEncoding::Opaque
        );
        assert!("base64".parse::<PayloadEncoding>().is_err());
    }

    #[test]
    fn test_default_is_hex() {
        assert_eq!(PayloadEncoding::default(), PayloadEncoding::Hex);
    }
}

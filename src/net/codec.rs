//! Text encodings of wire arguments.
//!
//! Packed values travel as lowercase unsigned hexadecimal without prefix;
//! player names as standard base64 of their UTF-8 bytes.

use base64::prelude::*;

use crate::cards::Card;
use crate::error::{JassError, Result};

/// Lowercase hex of a packed value.
pub fn encode_hex(value: impl Into<u64>) -> String {
    format!("{:x}", value.into())
}

pub fn decode_u64(text: &str) -> Result<u64> {
    u64::from_str_radix(text, 16)
        .map_err(|e| JassError::Protocol(format!("bad hex value {text:?}: {e}")))
}

pub fn decode_u32(text: &str) -> Result<u32> {
    u32::from_str_radix(text, 16)
        .map_err(|e| JassError::Protocol(format!("bad hex value {text:?}: {e}")))
}

pub fn encode_name(name: &str) -> String {
    BASE64_STANDARD.encode(name.as_bytes())
}

pub fn decode_name(text: &str) -> Result<String> {
    let bytes = BASE64_STANDARD
        .decode(text)
        .map_err(|e| JassError::Protocol(format!("bad base64 name {text:?}: {e}")))?;
    String::from_utf8(bytes).map_err(|e| JassError::Protocol(format!("name is not UTF-8: {e}")))
}

/// The reply to a `CARD` request.
pub fn encode_card(card: Card) -> String {
    encode_hex(card.packed())
}

pub fn decode_card(text: &str) -> Result<Card> {
    let packed = decode_u32(text)?;
    let packed = u8::try_from(packed)
        .map_err(|_| JassError::Protocol(format!("card {text:?} out of range")))?;
    Card::from_packed(packed).map_err(into_protocol)
}

/// A value that decoded as hex but does not pack a valid domain value is a
/// protocol violation from the peer's point of view.
pub(crate) fn into_protocol(err: JassError) -> JassError {
    match err {
        JassError::Protocol(_) | JassError::Io(_) => err,
        other => JassError::Protocol(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn test_hex() {
        assert_eq!(encode_hex(0u32), "0");
        assert_eq!(encode_hex(u32::MAX), "ffffffff");
        assert_eq!(encode_hex(0x01FF_01FF_01FF_01FFu64), "1ff01ff01ff01ff");
        assert_eq!(decode_u64("1ff01ff01ff01ff").unwrap(), 0x01FF_01FF_01FF_01FF);
        assert_eq!(decode_u32("ffffffff").unwrap(), u32::MAX);
    }

    #[test]
    fn test_bad_hex_is_protocol_error() {
        assert!(matches!(decode_u64("xyz"), Err(JassError::Protocol(_))));
        assert!(matches!(decode_u32(""), Err(JassError::Protocol(_))));
        assert!(matches!(decode_u32("100000000"), Err(JassError::Protocol(_))));
    }

    #[test]
    fn test_names() {
        assert_eq!(encode_name("Aline"), "QWxpbmU=");
        assert_eq!(decode_name("QWxpbmU=").unwrap(), "Aline");
        assert_eq!(decode_name(&encode_name("Zoë")).unwrap(), "Zoë");
        assert!(matches!(decode_name("**"), Err(JassError::Protocol(_))));
    }

    #[test]
    fn test_card_reply() {
        let card = Card::new(Suit::Club, Rank::Jack);
        assert_eq!(encode_card(card), "35");
        assert_eq!(decode_card("35").unwrap(), card);
        assert!(matches!(decode_card("3f"), Err(JassError::Protocol(_))));
        assert!(matches!(decode_card("135"), Err(JassError::Protocol(_))));
    }
}

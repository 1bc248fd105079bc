//! Keyed authentication for origin command tokens.
//!
//! Every token carries a short decimal auth field derived from SipHash-2-4
//! over a canonical little-endian byte packing. Receivers hold the same
//! 16-byte symmetric key and recompute the tag independently, so both the
//! packing and the truncation here are fixed bit-for-bit.

use std::hash::Hasher;

use siphasher::sip::SipHasher24;

use crate::constants::SYM_KEY_LEN;
use crate::error::OriginError;

/// 16-byte symmetric key shared between the origin and one device.
///
/// Keys are supplied per call and never persisted by this crate. Zeroization
/// on disposal is the caller's concern.
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricKey([u8; SYM_KEY_LEN]);

impl SymmetricKey {
    /// Validate and adopt a key, rejecting any length other than 16 bytes
    /// before packing or hashing happens anywhere downstream.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, OriginError> {
        let bytes: [u8; SYM_KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| OriginError::InvalidKeyLength {
                    actual: bytes.len(),
                })?;
        Ok(Self(bytes))
    }

    /// Parse a key from 32 hex characters.
    pub fn from_hex(hex_key: &str) -> Result<Self, OriginError> {
        let decoded = hex::decode(hex_key)?;
        Self::from_bytes(&decoded)
    }

    pub fn as_bytes(&self) -> &[u8; SYM_KEY_LEN] {
        &self.0
    }
}

impl From<[u8; SYM_KEY_LEN]> for SymmetricKey {
    fn from(bytes: [u8; SYM_KEY_LEN]) -> Self {
        Self(bytes)
    }
}

// Key material must never end up in logs or panic messages.
impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SymmetricKey(..)")
    }
}

/// SipHash-2-4 tag over a canonical packing.
pub fn mac(key: &SymmetricKey, message: &[u8]) -> u64 {
    let mut hasher = SipHasher24::new_with_key(key.as_bytes());
    hasher.write(message);
    hasher.finish()
}

/// The `digits` least-significant decimal digits of the low 32 bits of a tag,
/// zero-padded. This is a decimal truncation, not a bit truncation: the low
/// 32 bits are rendered as a decimal number first, then the last `digits`
/// characters are kept.
pub fn digits_from_tag(tag: u64, digits: usize) -> String {
    let low = tag & 0xFFFF_FFFF;
    let rendered = format!("{low:0width$}", width = digits);
    rendered[rendered.len() - digits..].to_owned()
}

/// Same truncation as [`digits_from_tag`], as an integer (`low32 % 10^digits`).
/// Used where the digit value itself feeds a later packing. Only meaningful
/// for widths up to 9.
pub fn tag_digits(tag: u64, digits: u32) -> u32 {
    debug_assert!(digits <= 9);
    ((tag & 0xFFFF_FFFF) as u32) % 10u32.pow(digits)
}

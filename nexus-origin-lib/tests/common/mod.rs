//! Common test fixtures shared across the integration test files.

// Not every test file uses every helper.
#![allow(dead_code)]

pub use nexus_origin_lib::error::OriginError;
pub use nexus_origin_lib::{
    ChannelOriginAction, CommandToken, NexusDeviceId, ObscureDigits, SymmetricKey,
};

/// The all-zero controller key from the worked protocol example.
pub fn zero_key() -> SymmetricKey {
    SymmetricKey::from([0u8; 16])
}

/// A key with every byte set to `fill`, for tests needing distinct keys.
pub fn patterned_key(fill: u8) -> SymmetricKey {
    SymmetricKey::from([fill; 16])
}

pub fn all_decimal(digits: &str) -> bool {
    digits.chars().all(|c| c.is_ascii_digit())
}

/// Stand-in for the keycode transport's obscuring transform: rotate every
/// digit up by one. Length-preserving and changes every character, like a
/// worst case for boundary tests.
pub struct RotateDigits;

impl ObscureDigits for RotateDigits {
    fn obscure(&self, digits: &str) -> String {
        digits
            .chars()
            .map(|c| {
                let d = c.to_digit(10).expect("token digits are decimal");
                char::from_digit((d + 1) % 10, 10).expect("digit arithmetic stays in 0-9")
            })
            .collect()
    }
}

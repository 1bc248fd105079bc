// Protocol constants for Nexus Channel origin command tokens

/// Length of a symmetric Nexus key (16 bytes)
pub const SYM_KEY_LEN: usize = 16;

/// Decimal digits in the auth field of every token
pub const AUTH_FIELD_DIGITS: usize = 6;

/// Decimal digits in the link challenge body
pub const LINK_CHALLENGE_DIGITS: usize = 6;

/// Serialized digits of a generic controller action token (type + 2 + auth)
pub const GENERIC_ACTION_TOKEN_DIGITS: usize = 9;

/// Serialized digits of a specific-accessory token (type + 1 + auth)
pub const SPECIFIC_ACCESSORY_TOKEN_DIGITS: usize = 8;

/// Serialized digits of a link-accessory token (type + 6 + auth)
pub const LINK_TOKEN_DIGITS: usize = 13;

/// Packed MAC input for a generic controller action (count + type + action)
pub const GENERIC_ACTION_PACKED_LEN: usize = 9;

/// Packed MAC input for a specific-accessory action (count + type + authority + device)
pub const SPECIFIC_ACCESSORY_PACKED_LEN: usize = 11;

/// Packed MAC input for the accessory-scoped link challenge (count only)
pub const LINK_CHALLENGE_PACKED_LEN: usize = 4;

/// Packed MAC input for the controller-scoped link auth (count + type + challenge)
pub const LINK_AUTH_PACKED_LEN: usize = 9;

/// Largest value a 48-bit Nexus device identifier may take
pub const MAX_NEXUS_ID: u64 = (1 << 48) - 1;

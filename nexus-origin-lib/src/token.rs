use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;

use crate::error::OriginError;

/// Wire-level origin command types.
///
/// Each type occupies exactly one decimal digit of a token, so only values
/// 0-9 can ever be transmitted via keycode. Business-level actions are a
/// superset: several actions share one wire type (see
/// [`ChannelOriginAction`](crate::command::ChannelOriginAction)).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, Serialize,
)]
#[repr(u8)]
pub enum OriginCommandType {
    GenericControllerAction = 0,
    UnlockAccessory = 1,
    UnlinkAccessory = 2,
    // 3-8 reserved
    LinkAccessoryMode3 = 9,
}

impl OriginCommandType {
    /// Parse a wire code, rejecting reserved (3-8) and out-of-range values.
    pub fn from_code(code: u8) -> Result<Self, OriginError> {
        Self::try_from(code).map_err(|_| OriginError::InvalidType { code })
    }

    pub fn code(self) -> u8 {
        self.into()
    }
}

/// The keycode transport's digit-obscuring transform.
///
/// The algorithm itself lives with the transport and is opaque to this crate;
/// the only contract is that the returned string has the same length as the
/// input. [`CommandToken::to_obscured_digits`] fixes the boundary: the
/// transform only ever sees the digits ahead of the auth field.
pub trait ObscureDigits {
    fn obscure(&self, digits: &str) -> String;
}

/// One origin command token: a 1-digit type code, a type-specific body, and
/// a truncated-MAC auth field, all decimal digits.
///
/// Tokens of every family share this one shape; what differs per family is
/// construction, handled by the free builders in [`crate::command`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandToken {
    command_type: OriginCommandType,
    body: String,
    auth: String,
}

impl CommandToken {
    pub(crate) fn new(command_type: OriginCommandType, body: String, auth: String) -> Self {
        Self {
            command_type,
            body,
            auth,
        }
    }

    /// Construct a token from a raw wire code and pre-built digit fields.
    /// Fails with [`OriginError::InvalidType`] if the code is not one of the
    /// recognized wire types.
    pub fn from_parts(code: u8, body: String, auth: String) -> Result<Self, OriginError> {
        Ok(Self::new(OriginCommandType::from_code(code)?, body, auth))
    }

    pub fn command_type(&self) -> OriginCommandType {
        self.command_type
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn auth(&self) -> &str {
        &self.auth
    }

    /// Clear digit rendering: type code, body, auth, in that order.
    /// Length is always `1 + body.len() + auth.len()`.
    pub fn to_digits(&self) -> String {
        format!("{}{}{}", self.command_type.code(), self.body, self.auth)
    }

    /// Rendering for transmission: the type code and body run through the
    /// transport's obscuring transform, the auth digits are appended clear.
    ///
    /// The auth field must reach the receiver untouched so it can be compared
    /// against the receiver's own MAC computation without first reversing an
    /// opaque transform.
    pub fn to_obscured_digits(&self, obscurer: &impl ObscureDigits) -> String {
        let prefix = format!("{}{}", self.command_type.code(), self.body);
        format!("{}{}", obscurer.obscure(&prefix), self.auth)
    }
}

impl std::fmt::Display for CommandToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_digits())
    }
}

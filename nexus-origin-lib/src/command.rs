//! Business-level origin actions and the per-family token builders.
//!
//! Each builder packs a canonical little-endian byte layout, derives the auth
//! digits from a SipHash-2-4 tag over it, and assembles a [`CommandToken`].
//! Builders are pure functions of their arguments; the caller is responsible
//! for supplying a fresh command count per key and role.

use bytes::{BufMut, BytesMut};
use num_enum::IntoPrimitive;
use serde::Serialize;
use strum_macros::Display;
use tracing::debug;

use crate::auth::{self, SymmetricKey};
use crate::constants::{
    AUTH_FIELD_DIGITS, GENERIC_ACTION_PACKED_LEN, LINK_AUTH_PACKED_LEN, LINK_CHALLENGE_DIGITS,
    LINK_CHALLENGE_PACKED_LEN, MAX_NEXUS_ID, SPECIFIC_ACCESSORY_PACKED_LEN,
};
use crate::error::OriginError;
use crate::token::{CommandToken, OriginCommandType};

/// 48-bit Nexus device identifier: a 16-bit authority component over a 32-bit
/// device component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NexusDeviceId(u64);

impl NexusDeviceId {
    /// Validate a raw identifier. Values above 2^48 - 1 are rejected rather
    /// than silently truncated, since a truncated id would corrupt the MAC
    /// input unnoticed.
    pub fn new(id: u64) -> Result<Self, OriginError> {
        if id > MAX_NEXUS_ID {
            return Err(OriginError::FieldOverflow {
                field: "accessory_nexus_id",
                value: id,
                max: MAX_NEXUS_ID,
            });
        }
        Ok(Self(id))
    }

    /// Upper 16 bits: the authority (vendor) component.
    pub fn authority_id(self) -> u16 {
        (self.0 >> 32) as u16
    }

    /// Lower 32 bits: the device component.
    pub fn device_id(self) -> u32 {
        (self.0 & 0xFFFF_FFFF) as u32
    }

    /// The single transmitted body digit, `device_id % 10`. Lossy on purpose
    /// to keep tokens short: the receiving controller disambiguates by
    /// recomputing the MAC against every linked accessory's full id.
    pub fn truncated_digit(self) -> u8 {
        (self.device_id() % 10) as u8
    }
}

/// Controller-wide actions carried by wire type 0, packed as a 32-bit field.
///
/// Codes 2-99 are currently undefined; the transmitted body is two digits, so
/// nothing above 99 can ever be carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u32)]
pub enum GenericControllerActionType {
    /// Delete all accessory links from the receiving controller.
    UnlinkAllAccessories = 0,
    /// Unlock every linked accessory. Receivers do not implement this yet.
    UnlockAllAccessories = 1,
}

/// Business-level origin actions.
///
/// Several actions share one wire type; each variant carries exactly the
/// inputs its builder needs, and [`ChannelOriginAction::build`] dispatches
/// with an exhaustive match.
#[derive(Debug, Clone, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ChannelOriginAction {
    /// Delete all accessory links from the controller.
    UnlinkAllAccessories {
        controller_command_count: u32,
        controller_key: SymmetricKey,
    },
    /// Unlock all linked accessories. Encodable ahead of firmware rollout;
    /// current receivers do not support it.
    UnlockAllAccessories {
        controller_command_count: u32,
        controller_key: SymmetricKey,
    },
    /// Unlock one specific linked accessory. Same rollout caveat.
    UnlockAccessory {
        accessory_nexus_id: NexusDeviceId,
        controller_command_count: u32,
        controller_key: SymmetricKey,
    },
    /// Delete the link to one specific accessory. Same rollout caveat.
    UnlinkAccessory {
        accessory_nexus_id: NexusDeviceId,
        controller_command_count: u32,
        controller_key: SymmetricKey,
    },
    /// Establish a mode-3 secured link between controller and accessory.
    LinkAccessoryMode3 {
        controller_command_count: u32,
        accessory_command_count: u32,
        accessory_key: SymmetricKey,
        controller_key: SymmetricKey,
    },
}

impl ChannelOriginAction {
    /// Build the command token for this action.
    ///
    /// Invalid inputs are unrepresentable by this point (keys and ids are
    /// validated at construction), so every current arm succeeds; the
    /// `Result` keeps the dispatch contract stable for callers.
    pub fn build(&self) -> Result<CommandToken, OriginError> {
        debug!(action = %self, "building origin command token");
        let token = match self {
            Self::UnlinkAllAccessories {
                controller_command_count,
                controller_key,
            } => unlink_all_accessories(*controller_command_count, controller_key),
            Self::UnlockAllAccessories {
                controller_command_count,
                controller_key,
            } => unlock_all_accessories(*controller_command_count, controller_key),
            Self::UnlockAccessory {
                accessory_nexus_id,
                controller_command_count,
                controller_key,
            } => unlock_specific_accessory(
                *accessory_nexus_id,
                *controller_command_count,
                controller_key,
            ),
            Self::UnlinkAccessory {
                accessory_nexus_id,
                controller_command_count,
                controller_key,
            } => unlink_specific_accessory(
                *accessory_nexus_id,
                *controller_command_count,
                controller_key,
            ),
            Self::LinkAccessoryMode3 {
                controller_command_count,
                accessory_command_count,
                accessory_key,
                controller_key,
            } => link_accessory_mode_3(
                *controller_command_count,
                *accessory_command_count,
                accessory_key,
                controller_key,
            ),
        };
        Ok(token)
    }
}

/// Generic controller action: 1-digit type code (0), 2-digit zero-padded
/// action code, 6-digit auth.
///
/// Canonical packing (9 bytes):
/// `u32le controller_command_count, u8 type_code, u32le action_code`.
/// The action code is packed as a full 32-bit field, not as its two
/// transmitted digits, so the MAC input is not subject to body truncation.
fn generic_controller_action(
    action: GenericControllerActionType,
    controller_command_count: u32,
    controller_key: &SymmetricKey,
) -> CommandToken {
    let action_code = u32::from(action);

    let mut packed = BytesMut::with_capacity(GENERIC_ACTION_PACKED_LEN);
    packed.put_u32_le(controller_command_count);
    packed.put_u8(OriginCommandType::GenericControllerAction.code());
    packed.put_u32_le(action_code);
    debug_assert_eq!(packed.len(), GENERIC_ACTION_PACKED_LEN);

    let auth = auth::digits_from_tag(auth::mac(controller_key, &packed), AUTH_FIELD_DIGITS);
    CommandToken::new(
        OriginCommandType::GenericControllerAction,
        format!("{action_code:02}"),
        auth,
    )
}

/// Delete all accessory links from the receiving controller.
pub fn unlink_all_accessories(
    controller_command_count: u32,
    controller_key: &SymmetricKey,
) -> CommandToken {
    generic_controller_action(
        GenericControllerActionType::UnlinkAllAccessories,
        controller_command_count,
        controller_key,
    )
}

/// Unlock every accessory linked to the receiving controller.
pub fn unlock_all_accessories(
    controller_command_count: u32,
    controller_key: &SymmetricKey,
) -> CommandToken {
    generic_controller_action(
        GenericControllerActionType::UnlockAllAccessories,
        controller_command_count,
        controller_key,
    )
}

/// Specific-accessory action: 1-digit type code (1 or 2), 1-digit truncated
/// accessory id, 6-digit auth.
///
/// Canonical packing (11 bytes):
/// `u32le controller_command_count, u8 type_code, u16le authority_id,
/// u32le device_id` - the full untruncated identifier, not the transmitted
/// digit. The receiving controller cannot name the target from the token
/// alone; it recomputes the MAC against each linked accessory's full id and
/// accepts only on a unique match.
fn specific_accessory_action(
    command_type: OriginCommandType,
    accessory_nexus_id: NexusDeviceId,
    controller_command_count: u32,
    controller_key: &SymmetricKey,
) -> CommandToken {
    let mut packed = BytesMut::with_capacity(SPECIFIC_ACCESSORY_PACKED_LEN);
    packed.put_u32_le(controller_command_count);
    packed.put_u8(command_type.code());
    packed.put_u16_le(accessory_nexus_id.authority_id());
    packed.put_u32_le(accessory_nexus_id.device_id());
    debug_assert_eq!(packed.len(), SPECIFIC_ACCESSORY_PACKED_LEN);

    let auth = auth::digits_from_tag(auth::mac(controller_key, &packed), AUTH_FIELD_DIGITS);
    CommandToken::new(
        command_type,
        accessory_nexus_id.truncated_digit().to_string(),
        auth,
    )
}

/// Unlock one specific linked accessory.
pub fn unlock_specific_accessory(
    accessory_nexus_id: NexusDeviceId,
    controller_command_count: u32,
    controller_key: &SymmetricKey,
) -> CommandToken {
    specific_accessory_action(
        OriginCommandType::UnlockAccessory,
        accessory_nexus_id,
        controller_command_count,
        controller_key,
    )
}

/// Delete the link to one specific accessory.
pub fn unlink_specific_accessory(
    accessory_nexus_id: NexusDeviceId,
    controller_command_count: u32,
    controller_key: &SymmetricKey,
) -> CommandToken {
    specific_accessory_action(
        OriginCommandType::UnlinkAccessory,
        accessory_nexus_id,
        controller_command_count,
        controller_key,
    )
}

/// Link-accessory mode 3: 1-digit type code (9), 6-digit challenge body,
/// 6-digit auth, built as a two-stage authentication chain.
///
/// The relaying controller never holds the accessory's key. Stage 1 derives a
/// challenge only the genuine accessory can validate; stage 2 authenticates
/// the whole command to the controller. The controller checks the auth with
/// its own key and counter state and, only if valid, forwards the challenge
/// digits onward to the accessory. No party other than the origin ever needs
/// both keys at once.
pub fn link_accessory_mode_3(
    controller_command_count: u32,
    accessory_command_count: u32,
    accessory_key: &SymmetricKey,
    controller_key: &SymmetricKey,
) -> CommandToken {
    // Stage 1, accessory-scoped: the challenge the accessory will recompute
    // from its own command count. Packing (4 bytes): u32le count.
    let mut challenge_input = BytesMut::with_capacity(LINK_CHALLENGE_PACKED_LEN);
    challenge_input.put_u32_le(accessory_command_count);
    let challenge = auth::tag_digits(
        auth::mac(accessory_key, &challenge_input),
        LINK_CHALLENGE_DIGITS as u32,
    );

    // Stage 2, controller-scoped: auth over the challenge digits. Packing
    // (9 bytes): u32le count, u8 type_code, u32le challenge value.
    let mut auth_input = BytesMut::with_capacity(LINK_AUTH_PACKED_LEN);
    auth_input.put_u32_le(controller_command_count);
    auth_input.put_u8(OriginCommandType::LinkAccessoryMode3.code());
    auth_input.put_u32_le(challenge);
    debug_assert_eq!(auth_input.len(), LINK_AUTH_PACKED_LEN);

    let auth = auth::digits_from_tag(auth::mac(controller_key, &auth_input), AUTH_FIELD_DIGITS);
    CommandToken::new(
        OriginCommandType::LinkAccessoryMode3,
        format!("{challenge:0width$}", width = LINK_CHALLENGE_DIGITS),
        auth,
    )
}

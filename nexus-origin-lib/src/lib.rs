//! Nexus Channel origin command tokens.
//!
//! An origin (typically a backend server) issues short decimal-digit command
//! tokens that reconfigure the Nexus Channel security state of a controller
//! and, through it, accessory devices linked to it. Tokens ride inside a
//! numeric keycode transport (read aloud, typed, sent by SMS), so everything
//! here is digits: a 1-digit type code, a type-specific body, and a truncated
//! SipHash-2-4 auth field that receivers recompute with a shared 16-byte key.
//!
//! This crate is the origin-side encoder only. Keycode framing, receiver
//! verification, key provisioning, and command-count persistence all live
//! elsewhere. Callers must never reuse a command count for the same key and
//! role; that uniqueness is what gives receivers replay protection.

pub mod auth;
pub mod command;
pub mod constants;
pub mod error;
pub mod token;

// Re-export the types most callers need
pub use auth::SymmetricKey;
pub use command::{ChannelOriginAction, NexusDeviceId};
pub use error::OriginError;
pub use token::{CommandToken, ObscureDigits, OriginCommandType};

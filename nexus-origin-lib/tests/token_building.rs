//! Token construction: layouts, lengths, determinism, and dispatch.

mod common;

use common::*;
use nexus_origin_lib::auth;
use nexus_origin_lib::command::{
    link_accessory_mode_3, unlink_all_accessories, unlink_specific_accessory,
    unlock_all_accessories, unlock_specific_accessory,
};
use nexus_origin_lib::constants::{
    AUTH_FIELD_DIGITS, GENERIC_ACTION_TOKEN_DIGITS, LINK_TOKEN_DIGITS,
    SPECIFIC_ACCESSORY_TOKEN_DIGITS,
};

#[test]
fn generic_action_tokens_are_nine_decimal_digits() {
    for count in [0u32, 1, 7, 99_999, u32::MAX] {
        for token in [
            unlink_all_accessories(count, &zero_key()),
            unlock_all_accessories(count, &patterned_key(0x33)),
        ] {
            let digits = token.to_digits();
            assert_eq!(digits.len(), GENERIC_ACTION_TOKEN_DIGITS);
            assert!(all_decimal(&digits));
        }
    }
}

#[test]
fn specific_accessory_tokens_are_eight_decimal_digits() {
    for id in [0u64, 9, 123_456, (1 << 48) - 1] {
        let id = NexusDeviceId::new(id).unwrap();
        for token in [
            unlock_specific_accessory(id, 1, &zero_key()),
            unlink_specific_accessory(id, u32::MAX, &patterned_key(0x44)),
        ] {
            let digits = token.to_digits();
            assert_eq!(digits.len(), SPECIFIC_ACCESSORY_TOKEN_DIGITS);
            assert!(all_decimal(&digits));
        }
    }
}

#[test]
fn link_tokens_are_thirteen_decimal_digits() {
    for (controller_count, accessory_count) in [(0u32, 0u32), (1, 9), (u32::MAX, u32::MAX)] {
        let token = link_accessory_mode_3(
            controller_count,
            accessory_count,
            &patterned_key(0xAA),
            &patterned_key(0xBB),
        );
        let digits = token.to_digits();
        assert_eq!(digits.len(), LINK_TOKEN_DIGITS);
        assert!(all_decimal(&digits));
        assert!(digits.starts_with('9'));
    }
}

#[test]
fn unlink_all_matches_worked_example() {
    // Zero controller key, count 1: the first three digits are type 0 plus
    // action code 00, and the auth field is the decimal truncation of the
    // SipHash tag over the 9-byte packing [count, type, action].
    let token = unlink_all_accessories(1, &zero_key());
    let digits = token.to_digits();
    assert_eq!(digits.len(), 9);
    assert!(digits.starts_with("000"));

    let mut packed = Vec::new();
    packed.extend_from_slice(&1u32.to_le_bytes());
    packed.push(0);
    packed.extend_from_slice(&0u32.to_le_bytes());
    let expected = auth::digits_from_tag(auth::mac(&zero_key(), &packed), AUTH_FIELD_DIGITS);
    assert_eq!(token.auth(), expected);
}

#[test]
fn specific_accessory_body_is_the_truncated_device_id() {
    let id = NexusDeviceId::new((0x0102u64 << 32) | 1234).unwrap();
    let unlock = unlock_specific_accessory(id, 5, &zero_key());
    assert!(unlock.to_digits().starts_with("14")); // type 1, 1234 % 10
    let unlink = unlink_specific_accessory(id, 5, &zero_key());
    assert!(unlink.to_digits().starts_with("24")); // type 2, same body digit
}

#[test]
fn repeated_calls_are_deterministic() {
    let id = NexusDeviceId::new(987_654_321).unwrap();
    for _ in 0..3 {
        assert_eq!(
            unlink_all_accessories(42, &patterned_key(0x17)),
            unlink_all_accessories(42, &patterned_key(0x17)),
        );
        assert_eq!(
            unlock_specific_accessory(id, 42, &patterned_key(0x17)),
            unlock_specific_accessory(id, 42, &patterned_key(0x17)),
        );
        assert_eq!(
            link_accessory_mode_3(1, 2, &patterned_key(0x01), &patterned_key(0x02)),
            link_accessory_mode_3(1, 2, &patterned_key(0x01), &patterned_key(0x02)),
        );
    }
}

#[test]
fn dispatch_matches_the_free_builders() {
    let controller_key = patterned_key(0x41);
    let accessory_key = patterned_key(0x42);
    let id = NexusDeviceId::new(55_555).unwrap();

    let built = ChannelOriginAction::UnlinkAllAccessories {
        controller_command_count: 3,
        controller_key: controller_key.clone(),
    }
    .build()
    .unwrap();
    assert_eq!(built, unlink_all_accessories(3, &controller_key));

    let built = ChannelOriginAction::UnlockAccessory {
        accessory_nexus_id: id,
        controller_command_count: 3,
        controller_key: controller_key.clone(),
    }
    .build()
    .unwrap();
    assert_eq!(built, unlock_specific_accessory(id, 3, &controller_key));

    let built = ChannelOriginAction::LinkAccessoryMode3 {
        controller_command_count: 3,
        accessory_command_count: 8,
        accessory_key: accessory_key.clone(),
        controller_key: controller_key.clone(),
    }
    .build()
    .unwrap();
    assert_eq!(
        built,
        link_accessory_mode_3(3, 8, &accessory_key, &controller_key)
    );
}

#[test]
fn reserved_wire_codes_are_rejected_at_construction() {
    for code in 3u8..=8 {
        assert!(matches!(
            CommandToken::from_parts(code, "00".to_owned(), "123456".to_owned()),
            Err(OriginError::InvalidType { code: c }) if c == code
        ));
    }
    assert!(CommandToken::from_parts(9, "000000".to_owned(), "123456".to_owned()).is_ok());
}

#[test]
fn token_serializes_for_structured_output() {
    let token = unlink_all_accessories(1, &zero_key());
    let value = serde_json::to_value(&token).unwrap();
    assert_eq!(value["command_type"], "GenericControllerAction");
    assert_eq!(value["body"], "00");
    assert_eq!(value["auth"].as_str().unwrap().len(), 6);
}

use serde_json::json;
use teloxide::types::{InlineKeyboardButtonKind, Update};

use super::*;

fn parse_update(value: serde_json::Value) -> IncomingUpdate {
    let update: Update = serde_json::from_str(&value.to_string()).unwrap();
    IncomingUpdate::from(update)
}

#[test]
fn test_language_keyboard_offers_both_languages() {
    let rows = &LANGUAGE_KEYBOARD.inline_keyboard;
    assert_eq!(rows.len(), 1);

    let payloads = rows[0]
        .iter()
        .map(|button| match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
            other => panic!("unexpected button kind: {other:?}"),
        })
        .collect::<Vec<_>>();

    assert_eq!(payloads, vec!["lang_en".to_string(), "lang_ar".to_string()]);
}

#[test]
fn test_next_offset() {
    let update = IncomingUpdate { id: 41, kind: IncomingKind::Other };
    assert_eq!(update.next_offset(), 42);

    let update = IncomingUpdate { id: u32::MAX, kind: IncomingKind::Other };
    assert_eq!(update.next_offset(), i32::MAX);
}

#[test]
fn test_text_message_update() {
    let update = parse_update(json!({
        "update_id": 1001,
        "message": {
            "message_id": 5,
            "date": 1715817600,
            "chat": {"id": 123, "type": "private", "first_name": "Test"},
            "from": {"id": 123, "is_bot": false, "first_name": "Test"},
            "text": "a red fox in snow"
        }
    }));

    assert_eq!(
        update,
        IncomingUpdate {
            id: 1001,
            kind: IncomingKind::Text {
                chat_id: ChatId(123),
                text: "a red fox in snow".to_string(),
            },
        }
    );
}

#[test]
fn test_callback_query_update() {
    let update = parse_update(json!({
        "update_id": 1002,
        "callback_query": {
            "id": "query-1",
            "from": {"id": 123, "is_bot": false, "first_name": "Test"},
            "chat_instance": "instance",
            "data": "lang_ar",
            "message": {
                "message_id": 6,
                "date": 1715817600,
                "chat": {"id": 456, "type": "private", "first_name": "Test"},
                "text": "Please choose your language"
            }
        }
    }));

    assert_eq!(
        update,
        IncomingUpdate {
            id: 1002,
            kind: IncomingKind::Callback {
                query_id: "query-1".to_string(),
                chat_id: ChatId(456),
                data: Some("lang_ar".to_string()),
            },
        }
    );
}

#[test]
fn test_callback_query_without_message_uses_sender() {
    let update = parse_update(json!({
        "update_id": 1003,
        "callback_query": {
            "id": "query-2",
            "from": {"id": 789, "is_bot": false, "first_name": "Test"},
            "chat_instance": "instance",
            "data": "lang_en"
        }
    }));

    assert!(matches!(
        update.kind,
        IncomingKind::Callback { chat_id: ChatId(789), .. }
    ));
}

#[test]
fn test_non_text_message_is_other() {
    let update = parse_update(json!({
        "update_id": 1004,
        "message": {
            "message_id": 7,
            "date": 1715817600,
            "chat": {"id": 123, "type": "private", "first_name": "Test"},
            "sticker": {
                "file_id": "f",
                "file_unique_id": "u",
                "type": "regular",
                "width": 512,
                "height": 512,
                "is_animated": false,
                "is_video": false
            }
        }
    }));

    assert_eq!(update.id, 1004);
    assert_eq!(update.kind, IncomingKind::Other);
}

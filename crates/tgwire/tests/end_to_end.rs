//! Outbound preparation of a mixed parameter map, as sent by real callers.

use chrono::DateTime;
use serde_json::json;

use tgwire::core::{
    Chat, ChatAction, DepthPolicy, Message, Param, ParseMode, PrepareOptions, Update, UpdateKind,
    UpdateType, convert, prepare, prepare_default,
};

fn message(id: i64) -> Message {
    let date = DateTime::from_timestamp(1_500_000_000, 0).unwrap();
    Message::new(id, date, Chat::new(1, "private"))
}

fn scenario() -> Param {
    [
        (
            "allowed_updates",
            Param::from(vec![UpdateType::Message, UpdateType::EditedMessage]),
        ),
        (
            "after",
            Update::new(1, UpdateKind::Message(message(1))).into(),
        ),
        ("chat", Chat::new(1, "private").into()),
        ("reply_to_message", message(1).into()),
        ("caption", "lel kek xd".into()),
        ("parse_mode", ParseMode::Markdown.into()),
        ("action", ChatAction::Typing.into()),
        ("some", Param::Null),
        ("another", Param::Null),
        (
            "kek",
            Param::Seq(vec![1.into(), 2.into(), Param::Null]),
        ),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_mixed_parameter_map() {
    assert_eq!(
        prepare_default(&scenario()).unwrap(),
        json!({
            "allowed_updates": ["message", "edited_message"],
            "after": 2,
            "chat": 1,
            "reply_to_message": 1,
            "caption": "lel kek xd",
            "parse_mode": "Markdown",
            "action": "typing",
            "kek": [1, 2],
        })
    );
}

#[test]
fn test_mixed_parameter_map_keeping_nulls() {
    let options = PrepareOptions::default().remove_none(false);
    let prepared = prepare(&scenario(), &options).unwrap();
    assert_eq!(prepared["some"], serde_json::Value::Null);
    assert_eq!(prepared["kek"], json!([1, 2]));
}

#[test]
fn test_preparation_leaves_input_intact() {
    let input = scenario();
    let before = input.clone();
    prepare_default(&input).unwrap();
    assert_eq!(input, before);
}

#[test]
fn test_depth_guard_on_scenario() {
    let options = PrepareOptions::default().max_depth(1, DepthPolicy::Raise);
    assert!(prepare(&scenario(), &options).is_err());
}

#[test]
fn test_inbound_then_outbound() {
    let update: Update = convert(json!({
        "update_id": 41,
        "message": {
            "message_id": 3,
            "date": 1_500_000_000,
            "chat": {"id": 77, "type": "group", "title": "Friends"},
            "from": {"id": 5, "is_bot": false, "first_name": "Ann"},
            "text": "/start",
            "entities": [{"type": "bot_command", "offset": 0, "length": 6}],
        },
    }))
    .unwrap();

    let message = update.message().unwrap();
    assert_eq!(message.bot_command().as_deref(), Some("/start"));

    let params: Param = [
        ("offset", Param::from(update.clone())),
        ("chat_id", message.chat.clone().into()),
        ("reply_to_message_id", message.clone().into()),
    ]
    .into_iter()
    .collect();
    assert_eq!(
        prepare_default(&params).unwrap(),
        json!({"offset": 42, "chat_id": 77, "reply_to_message_id": 3})
    );
}

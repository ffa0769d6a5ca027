//! Markup resolution.
//!
//! Markup payloads carry no discriminant. A payload is matched against the
//! variants in a fixed order and the first variant whose accepted keys are a
//! superset of the payload's keys wins:
//!
//! 1. [`ReplyKeyboardMarkup`]
//! 2. [`InlineKeyboardMarkup`]
//! 3. [`ReplyKeyboardRemove`]
//! 4. [`ForceReply`]
//!
//! The order is the tie-break for payloads several variants accept, most
//! notably `{}` and `{"selective": true}`, which both resolve to a reply
//! keyboard and then fail for lack of `keyboard`.

use serde_json::{Map, Value};
use tracing::warn;

use super::convert;
use crate::error::{MappingError, MappingResult};
use crate::model::{
    ForceReply, InlineKeyboardMarkup, Markup, ReplyKeyboardMarkup, ReplyKeyboardRemove,
};

type Candidate = (&'static [&'static str], fn(Value) -> MappingResult<Markup>);

static CANDIDATES: [Candidate; 4] = [
    (ReplyKeyboardMarkup::FIELDS, |v| {
        convert::<ReplyKeyboardMarkup, _>(v).map(Markup::ReplyKeyboard)
    }),
    (InlineKeyboardMarkup::FIELDS, |v| {
        convert::<InlineKeyboardMarkup, _>(v).map(Markup::InlineKeyboard)
    }),
    (ReplyKeyboardRemove::FIELDS, |v| {
        convert::<ReplyKeyboardRemove, _>(v).map(Markup::ReplyKeyboardRemove)
    }),
    (ForceReply::FIELDS, |v| {
        convert::<ForceReply, _>(v).map(Markup::ForceReply)
    }),
];

/// Resolves an untagged markup payload into its variant.
///
/// Null entries count as absent and take no part in matching.
pub fn resolve(mut payload: Map<String, Value>) -> MappingResult<Markup> {
    payload.retain(|_, value| !value.is_null());

    let matched = CANDIDATES
        .iter()
        .find(|(accepted, _)| payload.keys().all(|key| accepted.contains(&key.as_str())));

    match matched {
        Some((_, build)) => build(Value::Object(payload)),
        None => {
            let mut keys: Vec<String> = payload.keys().cloned().collect();
            keys.sort();
            let payload = Value::Object(payload);
            warn!(keys = ?keys, payload = %payload, "Unrecognised markup shape");
            Err(MappingError::UnknownMarkup { keys })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::Message;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_resolve_reply_keyboard() {
        let markup = resolve(object(json!({"keyboard": [["a", "b"]], "one_time_keyboard": true})))
            .unwrap();
        let Markup::ReplyKeyboard(keyboard) = markup else {
            panic!("expected a reply keyboard, got {markup:?}");
        };
        assert_eq!(keyboard.keyboard[0].len(), 2);
        assert_eq!(keyboard.one_time_keyboard, Some(true));
    }

    #[test]
    fn test_resolve_inline_keyboard() {
        let markup = resolve(object(json!({
            "inline_keyboard": [[{"text": "Go", "url": "https://example.org"}]]
        })))
        .unwrap();
        assert!(matches!(markup, Markup::InlineKeyboard(ref m) if m.inline_keyboard[0][0].text == "Go"));
    }

    #[test]
    fn test_resolve_remove_keyboard() {
        let markup = resolve(object(json!({"remove_keyboard": true}))).unwrap();
        assert_eq!(markup, Markup::ReplyKeyboardRemove(ReplyKeyboardRemove::new()));
    }

    #[test]
    fn test_resolve_force_reply() {
        let markup = resolve(object(json!({"force_reply": true, "selective": false}))).unwrap();
        assert!(matches!(markup, Markup::ForceReply(ref m) if m.selective == Some(false)));
    }

    #[test]
    fn test_unknown_shape_fails() {
        let err = resolve(object(json!({"remove_keyboard": true, "keyboard": []}))).unwrap_err();
        assert_eq!(
            err,
            MappingError::UnknownMarkup {
                keys: vec!["keyboard".into(), "remove_keyboard".into()]
            }
        );
    }

    #[test]
    fn test_null_entries_ignored() {
        let markup = resolve(object(json!({"inline_keyboard": [["a"]], "selective": null}))).unwrap();
        assert_eq!(markup.kind(), crate::entity::EntityKind::InlineKeyboard);
    }

    #[test]
    fn test_empty_payload_takes_first_candidate() {
        let err = resolve(Map::new()).unwrap_err();
        assert_eq!(err, MappingError::missing("ReplyKeyboardMarkup", "keyboard"));
    }

    #[test]
    fn test_message_markup_resolved_on_conversion() {
        let message: Message = convert(json!({
            "message_id": 1,
            "date": 0,
            "chat": {"id": 1, "type": "private"},
            "reply_markup": {"inline_keyboard": [["Yes", "No"]]},
        }))
        .unwrap();
        assert_eq!(
            message.reply_markup.map(|m| m.kind()),
            Some(crate::entity::EntityKind::InlineKeyboard)
        );
    }
}

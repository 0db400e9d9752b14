//! Find the person behind a message.
//!
//! Workflow posts are authored by the workflow bot, so the submitter only shows
//! up as a user mention somewhere inside the message. Slack renders mentions
//! two ways: as a structured `{"type": "user", "user_id": ...}` element inside
//! `rich_text` blocks, and as `<@U123>` markup inside text fields. Both are
//! searched depth-first, in document order, and the first hit wins. Object
//! keys keep their order because serde_json is built with `preserve_order`.

use regex::Regex;
use serde_json::Value;

static USER_MENTION_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"<@([A-Za-z0-9]+)(?:\|[^>]*)?>")
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

/// First user id mentioned with `<@...>` markup in `text`.
///
/// # Examples
///
/// ```
/// use coffee_bot::slack::mentions::find_mention_in_text;
///
/// assert_eq!(find_mention_in_text("Order from <@U024BE7LH>"), Some("U024BE7LH".to_string()));
/// assert_eq!(find_mention_in_text("no one here"), None);
/// ```
#[must_use]
pub fn find_mention_in_text(text: &str) -> Option<String> {
    USER_MENTION_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// First user id mentioned anywhere in `blocks`.
#[must_use]
pub fn find_submitter_in_blocks(blocks: &[Value]) -> Option<String> {
    blocks.iter().find_map(find_submitter)
}

/// First user id mentioned in `node` or any of its descendants.
///
/// For objects, a structured user element matches itself; otherwise the
/// node's own `text` is searched before its remaining fields.
#[must_use]
pub fn find_submitter(node: &Value) -> Option<String> {
    match node {
        Value::String(s) => find_mention_in_text(s),
        Value::Array(items) => items.iter().find_map(find_submitter),
        Value::Object(map) => {
            if map.get("type").and_then(Value::as_str) == Some("user")
                && let Some(user_id) = map.get("user_id").and_then(Value::as_str)
            {
                return Some(user_id.to_string());
            }

            if let Some(found) = map.get("text").and_then(find_submitter) {
                return Some(found);
            }

            map.iter()
                .filter(|(key, _)| key.as_str() != "text")
                .find_map(|(_, child)| find_submitter(child))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mention_with_label() {
        assert_eq!(
            find_mention_in_text("hi <@U1ABC|jane>!"),
            Some("U1ABC".to_string())
        );
    }

    #[test]
    fn test_mention_requires_closing_bracket() {
        assert_eq!(find_mention_in_text("<@U1ABC"), None);
        assert_eq!(find_mention_in_text("<#C123|general>"), None);
    }

    #[test]
    fn test_structured_user_element() {
        let blocks = vec![json!({
            "type": "rich_text",
            "elements": [{
                "type": "rich_text_section",
                "elements": [
                    {"type": "text", "text": "New order from "},
                    {"type": "user", "user_id": "U0RICH"}
                ]
            }]
        })];

        assert_eq!(find_submitter_in_blocks(&blocks), Some("U0RICH".to_string()));
    }

    #[test]
    fn test_section_text_markup() {
        let blocks = vec![
            json!({"type": "header", "text": {"type": "plain_text", "text": "Coffee order"}}),
            json!({"type": "section", "text": {"type": "mrkdwn", "text": "*Submitted by* <@U0SECTION>"}}),
        ];

        assert_eq!(
            find_submitter_in_blocks(&blocks),
            Some("U0SECTION".to_string())
        );
    }

    #[test]
    fn test_first_match_in_block_order() {
        let blocks = vec![
            json!({"type": "divider"}),
            json!({"type": "section", "fields": [
                {"type": "mrkdwn", "text": "*Drink*\nLatte"},
                {"type": "mrkdwn", "text": "*For* <@U0FIRST>"}
            ]}),
            json!({"type": "section", "text": {"type": "mrkdwn", "text": "<@U0SECOND>"}}),
        ];

        assert_eq!(find_submitter_in_blocks(&blocks), Some("U0FIRST".to_string()));
    }

    #[test]
    fn test_own_text_searched_before_children() {
        let block = json!({
            "type": "section",
            "fields": [{"type": "mrkdwn", "text": "<@U0FIELD>"}],
            "text": {"type": "mrkdwn", "text": "<@U0TEXT>"}
        });

        assert_eq!(find_submitter(&block), Some("U0TEXT".to_string()));
    }

    #[test]
    fn test_sibling_keys_follow_document_order() {
        let block = json!({
            "type": "section",
            "fields": [{"type": "mrkdwn", "text": "*For* <@U0FIELD>"}],
            "accessory": {
                "type": "button",
                "text": {"type": "plain_text", "text": "Ping <@U0BUTTON>"}
            }
        });
        assert_eq!(find_submitter(&block), Some("U0FIELD".to_string()));

        let raw = r#"{
            "type": "section",
            "elements": [{"type": "user", "user_id": "U0ELEMENT"}],
            "accessory": {"type": "user", "user_id": "U0ACCESSORY"}
        }"#;
        let parsed: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(find_submitter(&parsed), Some("U0ELEMENT".to_string()));
    }

    #[test]
    fn test_deeply_nested() {
        let mut node = json!({"type": "user", "user_id": "U0DEEP"});
        for _ in 0..20 {
            node = json!({"type": "container", "elements": [{"type": "divider"}, node]});
        }

        assert_eq!(find_submitter(&node), Some("U0DEEP".to_string()));
    }

    #[test]
    fn test_no_mention() {
        let blocks = vec![
            json!({"type": "section", "text": {"type": "mrkdwn", "text": "Oat milk latte"}}),
            json!({"type": "context", "elements": [{"type": "plain_text", "text": "via workflow"}]}),
        ];

        assert_eq!(find_submitter_in_blocks(&blocks), None);
        assert_eq!(find_submitter_in_blocks(&[]), None);
    }
}

//! Splitting outbound messages into provider-sized segments.

use crate::channel::{CONFIG_MAX_LENGTH, Channel};
use crate::message::OutboundMessage;

/// Default per-segment character limit for SMS providers.
pub const DEFAULT_MAX_MSG_LENGTH: usize = 160;

/// Render a message's text and attachments into the single string that gets
/// segmented.
///
/// The text is trimmed and each attachment contributes its URL on its own
/// line. A leading `content-type:` prefix (anything containing a `/` before
/// the first colon) is dropped.
pub fn text_and_attachments(msg: &OutboundMessage) -> String {
    let mut rendered = msg.text.trim().to_owned();
    for attachment in &msg.attachments {
        let url = match attachment.split_once(':') {
            Some((content_type, url)) if content_type.contains('/') => url,
            _ => attachment.as_str(),
        };
        if !rendered.is_empty() {
            rendered.push('\n');
        }
        rendered.push_str(url);
    }
    rendered
}

/// Per-segment limit for `channel`: its positive `max_length` config value if
/// set, `default` otherwise.
pub fn max_length_for(channel: &Channel, default: usize) -> usize {
    channel
        .int_config(CONFIG_MAX_LENGTH)
        .filter(|n| *n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(default)
}

/// Split `text` into segments of at most `limit` characters.
///
/// Splits happen after the last whitespace inside each window so words stay
/// whole; a window with no whitespace is cut at exactly `limit` characters.
/// Segments are never empty and concatenate back to `text`. Empty input
/// yields no segments.
pub fn split_msg(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut segments = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        let Some((cut, _)) = remaining.char_indices().nth(limit) else {
            segments.push(remaining.to_owned());
            break;
        };

        let window = &remaining[..cut];
        let split_at = window
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(cut, |(i, c)| i + c.len_utf8());

        let (segment, rest) = remaining.split_at(split_at);
        segments.push(segment.to_owned());
        remaining = rest;
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChannelUuid, MsgId};
    use crate::urn::Urn;

    fn msg(text: &str) -> OutboundMessage {
        OutboundMessage::new(
            MsgId::new(10),
            ChannelUuid::new_v4(),
            Urn::tel("+252634101111").unwrap(),
            text,
        )
    }

    fn assert_invariants(text: &str, limit: usize) {
        let segments = split_msg(text, limit);
        assert_eq!(segments.concat(), text, "segments must reassemble the text");
        for segment in &segments {
            assert!(!segment.is_empty(), "no empty segments");
            assert!(
                segment.chars().count() <= limit,
                "segment {segment:?} exceeds {limit}"
            );
        }
    }

    #[test]
    fn short_text_is_a_single_segment() {
        assert_eq!(split_msg("Simple Message", 160), ["Simple Message"]);
        let exact = "x".repeat(160);
        assert_eq!(split_msg(&exact, 160), [exact.clone()]);
    }

    #[test]
    fn empty_text_has_no_segments() {
        assert!(split_msg("", 160).is_empty());
    }

    #[test]
    fn splits_on_whitespace() {
        let segments = split_msg("hello world again", 12);
        assert_eq!(segments, ["hello world ", "again"]);
    }

    #[test]
    fn cuts_hard_without_whitespace() {
        let segments = split_msg("abcdefghij", 4);
        assert_eq!(segments, ["abcd", "efgh", "ij"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "☺".repeat(5);
        let segments = split_msg(&text, 2);
        assert_eq!(segments, ["☺☺", "☺☺", "☺"]);
    }

    #[test]
    fn long_message_matches_provider_split() {
        let text = "This is a longer message than 160 characters and will cause us to split it into two separate parts, isn't that right but it is even longer than before I say, I need to keep adding more things to make it work";
        let segments = split_msg(text, 160);
        assert_eq!(segments.len(), 2);
        assert!(segments[0].ends_with("before I say, I "));
        assert_eq!(segments[1], "need to keep adding more things to make it work");
        assert_invariants(text, 160);
    }

    #[test]
    fn invariants_hold_across_inputs() {
        let inputs = [
            "a",
            "a b",
            "   leading spaces",
            "trailing spaces   ",
            "multi\nline\ntext with\ttabs",
            "Unicode ☺ and ẞ mixed with ascii words and more words",
            "nospacesatallinthisverylongtokenthatkeepsgoing",
        ];
        for text in inputs {
            for limit in [1, 2, 3, 7, 10, 160] {
                assert_invariants(text, limit);
            }
        }
    }

    #[test]
    fn deterministic() {
        let text = "the same input always yields the same segmentation";
        assert_eq!(split_msg(text, 9), split_msg(text, 9));
    }

    #[test]
    fn zero_limit_is_treated_as_one() {
        assert_eq!(split_msg("ab", 0), ["a", "b"]);
    }

    #[test]
    fn attachments_are_rendered_as_urls() {
        let m = msg("  My pic!  ").with_attachment("image/jpeg:https://foo.bar/image.jpg");
        assert_eq!(text_and_attachments(&m), "My pic!\nhttps://foo.bar/image.jpg");
    }

    #[test]
    fn attachments_only() {
        let m = msg("")
            .with_attachment("image/jpeg:https://foo.bar/a.jpg")
            .with_attachment("https://foo.bar/b.jpg");
        assert_eq!(
            text_and_attachments(&m),
            "https://foo.bar/a.jpg\nhttps://foo.bar/b.jpg"
        );
    }

    #[test]
    fn max_length_override() {
        let ch = Channel::new(ChannelUuid::new_v4(), "HM", "SO", "2020");
        assert_eq!(max_length_for(&ch, DEFAULT_MAX_MSG_LENGTH), 160);

        let ch = ch.with_config(CONFIG_MAX_LENGTH, 70);
        assert_eq!(max_length_for(&ch, DEFAULT_MAX_MSG_LENGTH), 70);

        let ch = ch.with_config(CONFIG_MAX_LENGTH, 0);
        assert_eq!(max_length_for(&ch, DEFAULT_MAX_MSG_LENGTH), 160);
    }
}

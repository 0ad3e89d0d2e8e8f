//! Emoji isolation
//!
//! Emoji are detected by Unicode property rather than a fixed table, so new
//! emoji, flags (regional indicators) and skin-tone modifiers are covered by
//! whatever Unicode version the regex engine ships. A match is a whole emoji
//! sequence: keycaps, variation selectors, ZWJ joins and tag flags stay
//! attached to their base so none of their parts leak into a neighbouring
//! word.

use regex::{Captures, Regex};

use crate::error::{HatecheckError, Result};

/// Matches a run of emoji sequences. Keycaps (`1\u{FE0F}\u{20E3}`) come
/// first because their base is an ordinary digit, `#` or `*`.
pub const EMOJI_PATTERN: &str = concat!(
    r"[#*0-9]\x{FE0F}?\x{20E3}",
    r"|(?:[\p{Extended_Pictographic}\p{Emoji_Presentation}\p{Emoji_Modifier}]",
    r"[\x{FE0F}\x{20E3}\x{200D}\x{E0020}-\x{E007F}\p{Emoji_Modifier}]*)+",
);

/// Pads each code point of every emoji sequence with a space on both sides
#[derive(Debug, Clone)]
pub struct EmojiIsolator {
    regex: Regex,
}

impl EmojiIsolator {
    pub fn new() -> Result<Self> {
        let regex = Regex::new(EMOJI_PATTERN)
            .map_err(|e| HatecheckError::invalid_value("emoji pattern", e))?;
        Ok(EmojiIsolator { regex })
    }

    /// True if `text` contains at least one emoji
    pub fn contains_emoji(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Surround every code point of every emoji sequence with single
    /// spaces. Whitespace runs produced here are collapsed by a later
    /// normalization step.
    pub fn isolate(&self, text: &str) -> String {
        if !self.contains_emoji(text) {
            return text.to_string();
        }
        self.regex
            .replace_all(text, |caps: &Captures<'_>| {
                caps[0].chars().map(|c| format!(" {} ", c)).collect::<String>()
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn isolator() -> EmojiIsolator {
        EmojiIsolator::new().unwrap()
    }

    #[test]
    fn test_isolate_adjacent_emoji() {
        assert_eq!(isolator().isolate("bad😡"), "bad 😡 ");
        assert_eq!(isolator().isolate("😂lol"), " 😂 lol");
    }

    #[test]
    fn test_isolate_no_emoji_is_unchanged() {
        assert_eq!(isolator().isolate("plain text #tag"), "plain text #tag");
        assert!(!isolator().contains_emoji("digits 123 and * #"));
    }

    #[test]
    fn test_isolate_covers_wide_repertoire() {
        // Face, hand with skin tone, heart, flag, newer emoji
        for emoji in ["😀", "👍🏽", "❤", "🇮🇳", "🥲", "🫠"] {
            assert!(isolator().contains_emoji(emoji), "missed {}", emoji);
        }
    }

    #[test]
    fn test_isolate_skin_tone_modifier_split() {
        assert_eq!(isolator().isolate("👍🏽"), " 👍  🏽 ");
    }

    #[test]
    fn test_isolate_keycap_sequence() {
        let isolator = isolator();
        assert!(isolator.contains_emoji("1\u{fe0f}\u{20e3}"));
        assert!(isolator.contains_emoji("#\u{20e3}"));
        assert_eq!(
            isolator.isolate("call1\u{fe0f}\u{20e3}now"),
            "call 1  \u{fe0f}  \u{20e3} now"
        );
    }

    #[test]
    fn test_isolate_tag_sequence_flag() {
        let flag = "\u{1f3f4}\u{e0067}\u{e0062}\u{e0065}\u{e006e}\u{e0067}\u{e007f}";
        let isolated = isolator().isolate(&format!("go{}team", flag));
        assert!(isolated.starts_with("go \u{1f3f4} "), "got {:?}", isolated);
        assert!(isolated.ends_with(" \u{e007f} team"), "got {:?}", isolated);
    }

    #[test]
    fn test_isolate_keeps_variation_selector_off_next_word() {
        assert_eq!(
            isolator().isolate("\u{2764}\u{fe0f}love"),
            " \u{2764}  \u{fe0f} love"
        );
    }

    #[test]
    fn test_isolate_leaves_plain_hash_star_and_digits() {
        let isolator = isolator();
        for text in ["#1 fan", "5*", "call 100", "a\u{fe0f}b"] {
            assert!(!isolator.contains_emoji(text), "matched {:?}", text);
            assert_eq!(isolator.isolate(text), text);
        }
    }

    #[test]
    fn test_isolate_empty() {
        assert_eq!(isolator().isolate(""), "");
    }
}

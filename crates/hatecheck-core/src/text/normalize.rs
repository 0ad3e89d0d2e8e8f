//! Text normalization for noisy social-media input
//!
//! Normalization is an ordered list of [`Step`]s. Most steps are regex
//! rewrites described by a named [`RewriteRule`] so each one can be
//! inspected and tested on its own. Rules are compiled once by
//! [`Normalizer::new`]; after that, [`Normalizer::normalize`] accepts any
//! string and never fails.

use regex::{NoExpand, Regex};

use super::emoji::EmojiIsolator;
use crate::error::{HatecheckError, Result};

/// A single pattern -> replacement rewrite applied to the whole string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteRule {
    pub name: &'static str,
    pub pattern: &'static str,
    pub replacement: &'static str,
}

/// `@handle` at the very start of the text
pub const LEADING_MENTION: RewriteRule = RewriteRule {
    name: "leading_mention",
    pattern: r"^@[0-9a-z_.]+",
    replacement: "",
};

/// `@handle` preceded by a space; the space is removed with it
pub const INLINE_MENTION: RewriteRule = RewriteRule {
    name: "inline_mention",
    pattern: r" @[0-9a-z_.]+",
    replacement: "",
};

/// Literal `\x09`-style leftovers from broken byte escaping
pub const ESCAPED_HEX: RewriteRule = RewriteRule {
    name: "escaped_hex",
    pattern: r"\\x[0-9a-z]+",
    replacement: " ",
};

pub const URL: RewriteRule = RewriteRule {
    name: "url",
    pattern: r"http\S+",
    replacement: "",
};

/// Separator punctuation, swallowing a `!` that ends the text right after it.
/// A single trailing newline still counts as the end of the text.
/// `#`, `*` and other `!` are left alone.
pub const PUNCTUATION: RewriteRule = RewriteRule {
    name: "punctuation",
    pattern: r"[,;()\\.:\-_/|](?:!\n?\z)?",
    replacement: " ",
};

pub const DOUBLE_QUOTE: RewriteRule = RewriteRule {
    name: "double_quote",
    pattern: r#"""#,
    replacement: " ",
};

pub const SINGLE_QUOTE: RewriteRule = RewriteRule {
    name: "single_quote",
    pattern: r"'",
    replacement: " ",
};

pub const NEWLINE: RewriteRule = RewriteRule {
    name: "newline",
    pattern: r"\n",
    replacement: " ",
};

pub const SPACE_RUN: RewriteRule = RewriteRule {
    name: "space_run",
    pattern: r" {2,}",
    replacement: " ",
};

/// One stage of normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Strip leading and trailing whitespace
    Trim,
    /// Unicode lowercase
    Lowercase,
    /// Regex rewrite
    Rewrite(RewriteRule),
    /// Pad every emoji character with a space on both sides
    IsolateEmoji,
}

/// Normalization steps in application order. Changing this order changes
/// the output seen by the classifier.
pub const STEPS: [Step; 13] = [
    Step::Trim,
    Step::Lowercase,
    Step::Rewrite(LEADING_MENTION),
    Step::Rewrite(INLINE_MENTION),
    Step::Rewrite(ESCAPED_HEX),
    Step::Rewrite(URL),
    Step::Rewrite(PUNCTUATION),
    Step::Rewrite(DOUBLE_QUOTE),
    Step::Rewrite(SINGLE_QUOTE),
    Step::IsolateEmoji,
    Step::Rewrite(NEWLINE),
    Step::Rewrite(SPACE_RUN),
    Step::Trim,
];

#[derive(Debug, Clone)]
enum CompiledStep {
    Trim,
    Lowercase,
    Rewrite { rule: RewriteRule, regex: Regex },
    IsolateEmoji(EmojiIsolator),
}

impl CompiledStep {
    fn apply(&self, text: String) -> String {
        match self {
            CompiledStep::Trim => text.trim().to_string(),
            CompiledStep::Lowercase => text.to_lowercase(),
            CompiledStep::Rewrite { rule, regex } => regex
                .replace_all(&text, NoExpand(rule.replacement))
                .into_owned(),
            CompiledStep::IsolateEmoji(isolator) => isolator.isolate(&text),
        }
    }
}

/// Compile a rewrite rule into a regex
pub fn compile_rule(rule: &RewriteRule) -> Result<Regex> {
    Regex::new(rule.pattern).map_err(|e| {
        HatecheckError::invalid_value(&format!("normalization rule {}", rule.name), e)
    })
}

/// Compiled normalization pipeline
#[derive(Debug, Clone)]
pub struct Normalizer {
    steps: Vec<CompiledStep>,
}

impl Normalizer {
    /// Compile [`STEPS`]
    pub fn new() -> Result<Self> {
        Self::from_steps(&STEPS)
    }

    fn from_steps(steps: &[Step]) -> Result<Self> {
        let steps = steps
            .iter()
            .map(|step| {
                Ok(match step {
                    Step::Trim => CompiledStep::Trim,
                    Step::Lowercase => CompiledStep::Lowercase,
                    Step::Rewrite(rule) => CompiledStep::Rewrite {
                        rule: *rule,
                        regex: compile_rule(rule)?,
                    },
                    Step::IsolateEmoji => CompiledStep::IsolateEmoji(EmojiIsolator::new()?),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Normalizer { steps })
    }

    /// Normalize raw text. Total over all inputs.
    pub fn normalize(&self, raw: &str) -> String {
        self.steps
            .iter()
            .fold(raw.to_string(), |text, step| step.apply(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(rule: RewriteRule, input: &str) -> String {
        let regex = compile_rule(&rule).unwrap();
        regex
            .replace_all(input, NoExpand(rule.replacement))
            .into_owned()
    }

    fn normalize(input: &str) -> String {
        Normalizer::new().unwrap().normalize(input)
    }

    #[test]
    fn test_all_rules_compile() {
        for step in STEPS {
            if let Step::Rewrite(rule) = step {
                assert!(compile_rule(&rule).is_ok(), "rule {} failed", rule.name);
            }
        }
    }

    #[test]
    fn test_leading_mention_only_at_start() {
        assert_eq!(rewrite(LEADING_MENTION, "@john.doe_1 hello"), " hello");
        assert_eq!(rewrite(LEADING_MENTION, "hi @john"), "hi @john");
    }

    #[test]
    fn test_inline_mention_takes_preceding_space() {
        assert_eq!(rewrite(INLINE_MENTION, "hello @john and @jane_d"), "hello and");
        assert_eq!(rewrite(INLINE_MENTION, "mail@example"), "mail@example");
    }

    #[test]
    fn test_escaped_hex_becomes_space() {
        assert_eq!(rewrite(ESCAPED_HEX, r"abc\x09def"), "abc ");
        assert_eq!(rewrite(ESCAPED_HEX, r"a\xf0 b"), "a  b");
        assert_eq!(rewrite(ESCAPED_HEX, r"\ no hex"), r"\ no hex");
    }

    #[test]
    fn test_url_removed() {
        assert_eq!(
            rewrite(URL, "see https://t.co/abc?x=1 now"),
            "see  now"
        );
        assert_eq!(rewrite(URL, "httpfoo"), "");
        assert_eq!(rewrite(URL, "http"), "http");
    }

    #[test]
    fn test_punctuation_replaced() {
        assert_eq!(rewrite(PUNCTUATION, "a,b;c(d)e"), "a b c d e");
        assert_eq!(rewrite(PUNCTUATION, r"a\b.c:d-e_f/g|h"), "a b c d e f g h");
    }

    #[test]
    fn test_punctuation_swallows_trailing_exclamation_only() {
        assert_eq!(rewrite(PUNCTUATION, "wow.!"), "wow ");
        assert_eq!(rewrite(PUNCTUATION, "wow.! more"), "wow ! more");
    }

    #[test]
    fn test_punctuation_trailing_exclamation_before_final_newline() {
        assert_eq!(rewrite(PUNCTUATION, "wow.!\n"), "wow ");
        assert_eq!(rewrite(PUNCTUATION, "wow.!\nmore"), "wow !\nmore");
        assert_eq!(rewrite(PUNCTUATION, "wow.!\n\n"), "wow !\n\n");
    }

    #[test]
    fn test_sentiment_punctuation_preserved() {
        assert_eq!(rewrite(PUNCTUATION, "#tag *star* wow!!"), "#tag *star* wow!!");
    }

    #[test]
    fn test_quotes_replaced() {
        assert_eq!(rewrite(DOUBLE_QUOTE, r#"say "hi""#), "say  hi ");
        assert_eq!(rewrite(SINGLE_QUOTE, "don't"), "don t");
    }

    #[test]
    fn test_space_run_collapsed() {
        assert_eq!(rewrite(SPACE_RUN, "a  b     c d"), "a b c d");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_punctuation_only() {
        assert_eq!(normalize(" ,.;:()- / | \" ' "), "");
    }

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(normalize("   Hello WORLD   "), "hello world");
    }

    #[test]
    fn test_normalize_mentions_and_url() {
        assert_eq!(
            normalize("@Admin Check THIS http://example.com/x @john_doe"),
            "check this"
        );
    }

    #[test]
    fn test_normalize_newlines_become_spaces() {
        assert_eq!(normalize("line one\nline two\n\nthree"), "line one line two three");
    }

    #[test]
    fn test_normalize_isolates_emoji() {
        assert_eq!(normalize("nice😀work"), "nice 😀 work");
        assert_eq!(normalize("😀😀"), "😀 😀");
    }

    #[test]
    fn test_normalize_exclamation_ends_text_after_mention_removal() {
        assert_eq!(normalize("wow.!\n @bob"), "wow");
    }

    #[test]
    fn test_normalize_splits_keycap_from_words() {
        let out = normalize("call1\u{fe0f}\u{20e3}now");
        let tokens: Vec<&str> = out.split(' ').collect();
        assert!(tokens.len() > 1, "got {:?}", out);
        assert_eq!(tokens.first(), Some(&"call"));
        assert_eq!(tokens.last(), Some(&"now"));
    }

    #[test]
    fn test_normalize_splits_tag_flag_from_words() {
        let out = normalize(
            "go\u{1f3f4}\u{e0067}\u{e0062}\u{e0065}\u{e006e}\u{e0067}\u{e007f}team",
        );
        let tokens: Vec<&str> = out.split(' ').collect();
        assert_eq!(tokens.first(), Some(&"go"));
        assert_eq!(tokens.last(), Some(&"team"));
        assert!(tokens.contains(&"\u{1f3f4}"));
    }

    #[test]
    fn test_normalize_single_emoji() {
        assert_eq!(normalize("😡"), "😡");
    }

    #[test]
    fn test_normalize_keeps_mid_string_exclamations() {
        assert_eq!(normalize("I am sooooo happy!!! check"), "i am sooooo happy!!! check");
    }

    #[test]
    fn test_normalize_unbalanced_punctuation() {
        assert_eq!(normalize("((((hello)) world..."), "hello world");
        assert_eq!(normalize(r"\\\\"), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "Hello   there!!  @bob",
            "  mixed\tTabs and\nnewlines  ",
            "tu pagal hai kya 😂😂 http://x.y",
            "",
            "...",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_normalize_has_no_space_runs_or_edges() {
        let out = normalize("  a  ,  b ;; c \" d ' e  ");
        assert!(!out.contains("  "));
        assert_eq!(out, out.trim());
    }
}

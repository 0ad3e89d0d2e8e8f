//! Character-run collapsing ("soooo" -> "soo")
//!
//! A dictionary-free de-elongation: any run of three or more identical
//! characters is cut down to two. Each incoming character is compared with
//! the last character written to the output, not the previous input
//! character.

/// Longest run of one character kept in a token
pub const MAX_RUN: usize = 2;

/// Collapse runs in a single token
pub fn collapse_token(token: &str) -> String {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let (collapsed, _, _) = chars.fold(
        (String::from(first), first, 1usize),
        |(mut out, last, count), ch| {
            if ch == last {
                let count = count.saturating_add(1);
                if count <= MAX_RUN {
                    out.push(ch);
                }
                (out, last, count)
            } else {
                out.push(ch);
                (out, ch, 1)
            }
        },
    );

    collapsed
}

/// Collapse runs in every token, preserving order
pub fn collapse_runs<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| collapse_token(token.as_ref()))
        .collect()
}

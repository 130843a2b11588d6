//! Plain-text view of rich-text markup.
//!
//! Page content is opaque markup as far as the notepad is concerned, but two things need a
//! plain-text reading of it: the character counter and the text export. This module gives a
//! deliberately small reading: tags are dropped, block-closing tags and `<br>` become line
//! breaks, and the common character references are decoded.

use std::ops::Range;

const BLOCK_TAGS: &[&str] = &[
    "p",
    "div",
    "li",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "blockquote",
    "pre",
    "tr",
];

enum Token<'a> {
    Tag(&'a str),
    Text { ch: char, span: Range<usize> },
}

fn tokens(markup: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    let mut i = 0;

    while i < markup.len() {
        let rest = &markup[i..];

        if rest.starts_with('<') {
            if let Some(end) = rest.find('>') {
                out.push(Token::Tag(&rest[1..end]));
                i += end + 1;
                continue;
            }
        }

        if rest.starts_with('&') {
            if let Some((ch, len)) = decode_entity(rest) {
                out.push(Token::Text {
                    ch,
                    span: i..i + len,
                });
                i += len;
                continue;
            }
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        let len = ch.len_utf8();
        out.push(Token::Text {
            ch,
            span: i..i + len,
        });
        i += len;
    }

    out
}

/// Decodes a character reference at the start of `s`, returning the character and the
/// number of bytes it spans.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    let semi = s.get(..12).unwrap_or(s).find(';')?;
    let name = &s[1..semi];
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)?
        }
    };
    Some((ch, semi + 1))
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

fn breaks_line(tag: &str) -> bool {
    let name = tag_name(tag);
    name == "br" || (tag.starts_with('/') && BLOCK_TAGS.contains(&name.as_str()))
}

/// Returns the visible text of `markup`.
pub fn plain_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    for token in tokens(markup) {
        match token {
            Token::Text { ch, .. } => out.push(ch),
            Token::Tag(tag) => {
                if breaks_line(tag) {
                    out.push('\n');
                }
            }
        }
    }
    out.trim_end_matches('\n').to_string()
}

/// Number of characters a reader sees in `markup`.
pub fn char_count(markup: &str) -> usize {
    plain_text(markup).chars().count()
}

/// Maps a range of visible characters onto the byte range of `markup` that holds them.
///
/// Offsets count text characters only; tags and the line breaks they imply are not
/// addressable. Returns `None` for an empty or out-of-bounds range.
pub fn markup_range(markup: &str, chars: Range<usize>) -> Option<Range<usize>> {
    if chars.start >= chars.end {
        return None;
    }
    let spans: Vec<Range<usize>> = tokens(markup)
        .into_iter()
        .filter_map(|t| match t {
            Token::Text { span, .. } => Some(span),
            Token::Tag(_) => None,
        })
        .collect();

    let first = spans.get(chars.start)?;
    let last = spans.get(chars.end - 1)?;
    Some(first.start..last.end)
}

/// Number of addressable characters in `markup` (see [`markup_range`]).
pub fn text_len(markup: &str) -> usize {
    tokens(markup)
        .iter()
        .filter(|t| matches!(t, Token::Text { .. }))
        .count()
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_inline_tags() {
        assert_eq!(plain_text("<p>Hello <b>bold</b> world</p>"), "Hello bold world");
    }

    #[test]
    fn blocks_and_breaks_become_newlines() {
        assert_eq!(plain_text("<p>one</p><p>two</p>"), "one\ntwo");
        assert_eq!(plain_text("a<br>b<br/>c"), "a\nb\nc");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(plain_text("<p>a &amp; b &lt;c&gt; &#65;&#x42;</p>"), "a & b <c> AB");
        assert_eq!(char_count("&amp;"), 1);
    }

    #[test]
    fn unknown_entities_stay_literal() {
        assert_eq!(plain_text("&bogus; &"), "&bogus; &");
    }

    #[test]
    fn empty_paragraph_has_no_characters() {
        assert_eq!(char_count("<p></p>"), 0);
        assert_eq!(char_count(""), 0);
    }

    #[test]
    fn char_count_counts_characters() {
        assert_eq!(char_count("<p>héllo</p>"), 5);
    }

    #[test]
    fn markup_range_skips_tags() {
        let markup = "<p>Hello <i>there</i></p>";
        let range = markup_range(markup, 0..5).unwrap();
        assert_eq!(&markup[range], "Hello");

        let range = markup_range(markup, 6..11).unwrap();
        assert_eq!(&markup[range], "there");
    }

    #[test]
    fn markup_range_treats_entities_as_one_character() {
        let markup = "a&amp;b";
        let range = markup_range(markup, 1..2).unwrap();
        assert_eq!(&markup[range], "&amp;");
    }

    #[test]
    fn markup_range_rejects_empty_and_out_of_bounds() {
        assert!(markup_range("<p>abc</p>", 1..1).is_none());
        assert!(markup_range("<p>abc</p>", 2..9).is_none());
        assert_eq!(text_len("<p>abc</p>"), 3);
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}

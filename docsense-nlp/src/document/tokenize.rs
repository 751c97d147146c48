//! Tokenization and sentence segmentation.

use regex::Regex;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

use super::lexicon::ABBREVIATIONS;

/// Spans that word-boundary segmentation would break apart.
static COMPOSITE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
          (?P<url>https?://\S*[^\s.,;:!?)\]])
        | (?P<acronym>\b(?:\p{L}\.){2,})
        | (?P<number>\b\d+(?:[:/]\d+)+\b)
        | (?P<compound>\b\p{L}[\p{L}\p{M}]*(?:-\p{L}[\p{L}\p{M}]*)+(?:['’]\p{L}+)?)
        ",
    )
    .unwrap()
});

/// Sentence-final abbreviations that may still end a sentence.
const CLOSING_ABBREVIATIONS: &[&str] = &["etc", "inc", "ltd", "co", "corp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Word,
    Number,
    Punct,
    Symbol,
}

/// A token before tagging, with byte offsets into the source text.
#[derive(Debug, Clone)]
pub(crate) struct RawToken {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

impl RawToken {
    fn new(text: &str, start: usize, kind: TokenKind) -> Self {
        Self {
            text: text.replace('’', "'"),
            start,
            end: start + text.len(),
            kind,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == TokenKind::Punct && self.text.chars().all(|c| matches!(c, '.' | '!' | '?'))
    }

    fn is_closing(&self) -> bool {
        matches!(
            self.text.as_str(),
            "\"" | "'" | ")" | "]" | "}" | "”" | "»"
        )
    }

    fn starts_upper(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }
}

/// Split text into raw tokens.
///
/// Words and numbers follow Unicode word boundaries. URLs, dotted acronyms
/// and hyphenated compounds are kept whole.
pub(crate) fn tokenize(text: &str) -> Vec<RawToken> {
    let mut tokens: Vec<RawToken> = Vec::new();
    let mut cursor = 0;

    for caps in COMPOSITE.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        segment(text, cursor, m.start(), &mut tokens);
        cursor = m.end();

        if caps.name("url").is_some() {
            tokens.push(RawToken::new(m.as_str(), m.start(), TokenKind::Symbol));
        } else if caps.name("number").is_some() {
            tokens.push(RawToken::new(m.as_str(), m.start(), TokenKind::Number));
        } else {
            push_word(m.as_str(), m.start(), &mut tokens);
        }
    }
    segment(text, cursor, text.len(), &mut tokens);

    tokens
}

/// Tokenize `text[from..to]` on word boundaries.
fn segment(text: &str, from: usize, to: usize, tokens: &mut Vec<RawToken>) {
    if from >= to {
        return;
    }

    for (offset, s) in text[from..to].split_word_bound_indices() {
        let start = from + offset;
        let Some(first) = s.chars().next() else { continue };

        if first.is_whitespace() {
            continue;
        }
        if first.is_alphabetic() {
            push_word(s, start, tokens);
        } else if first.is_numeric() {
            tokens.push(RawToken::new(s, start, TokenKind::Number));
        } else if matches!(first, '.' | '!' | '?') {
            push_terminal(s, start, tokens);
        } else {
            let kind = if s.chars().all(|c| c.is_ascii_punctuation() && !is_symbol(c))
                || matches!(s, "“" | "”" | "‘" | "–" | "—" | "«" | "»" | "…")
            {
                TokenKind::Punct
            } else {
                TokenKind::Symbol
            };
            tokens.push(RawToken::new(s, start, kind));
        }
    }
}

fn push_word(s: &str, start: usize, tokens: &mut Vec<RawToken>) {
    match clitic_split(s) {
        Some(at) => {
            tokens.push(RawToken::new(&s[..at], start, TokenKind::Word));
            tokens.push(RawToken::new(&s[at..], start + at, TokenKind::Word));
        }
        None => tokens.push(RawToken::new(s, start, TokenKind::Word)),
    }
}

/// Attach the period of a known abbreviation or an initial ("Dr.", "J."),
/// otherwise grow the adjacent run of terminal marks ("?!", "...").
fn push_terminal(s: &str, start: usize, tokens: &mut Vec<RawToken>) {
    if let Some(prev) = tokens.last_mut().filter(|prev| prev.end == start) {
        if s == "." && prev.kind == TokenKind::Word {
            let lower = prev.text.to_lowercase();
            let is_initial = prev.text.chars().count() == 1 && prev.starts_upper();
            if ABBREVIATIONS.contains(lower.as_str()) || is_initial {
                prev.text.push('.');
                prev.end = start + 1;
                return;
            }
        }
        if prev.is_terminal() {
            prev.text.push_str(s);
            prev.end = start + s.len();
            return;
        }
    }
    tokens.push(RawToken::new(s, start, TokenKind::Punct));
}

fn is_symbol(c: char) -> bool {
    matches!(c, '$' | '%' | '&' | '+' | '=' | '<' | '>' | '@' | '#' | '^' | '~' | '|' | '*')
}

/// Byte index at which a trailing clitic starts ("do|n't", "it|'s").
fn clitic_split(word: &str) -> Option<usize> {
    let apos = word.rfind(['\'', '’'])?;
    let head = &word[..apos];
    let apos_len = word[apos..].chars().next().map_or(1, char::len_utf8);
    let tail = word[apos + apos_len..].to_lowercase();

    if tail == "t" && head.len() > 1 && head.ends_with(['n', 'N']) {
        return Some(apos - 1);
    }
    if matches!(tail.as_str(), "s" | "re" | "ve" | "ll" | "d" | "m") && !head.is_empty() {
        return Some(apos);
    }
    None
}

/// Group tokens into sentences, returning half-open index ranges.
pub(crate) fn split_sentences(text: &str, tokens: &[RawToken]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut pending_break = false;

    for (i, token) in tokens.iter().enumerate() {
        if i > start {
            let prev = &tokens[i - 1];
            let gap = &text[prev.end..token.start];
            let newlines = gap.matches('\n').count();
            let line_break = newlines >= 2 || (newlines == 1 && token.starts_upper());

            let boundary = if pending_break {
                // Closing quotes and brackets stay with the finished sentence
                !(token.is_closing() && gap.is_empty())
            } else {
                line_break
            };

            if boundary {
                ranges.push((start, i));
                start = i;
                pending_break = false;
            }
        }

        if token.is_terminal() {
            let ellipsis = token.text.len() > 1 && token.text.chars().all(|c| c == '.');
            pending_break = !ellipsis
                || tokens
                    .get(i + 1)
                    .is_some_and(|next| next.starts_upper());
        } else if token.kind == TokenKind::Word && token.text.ends_with('.') {
            let stem = token.text.trim_end_matches('.').to_lowercase();
            pending_break = CLOSING_ABBREVIATIONS.contains(&stem.as_str())
                && tokens.get(i + 1).is_some_and(|next| next.starts_upper());
        } else if !(pending_break && token.is_closing()) {
            pending_break = false;
        }
    }

    if start < tokens.len() {
        ranges.push((start, tokens.len()));
    }
    ranges
}

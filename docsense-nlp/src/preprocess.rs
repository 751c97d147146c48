//! Text cleaning and quality assessment ahead of analysis.

use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use docsense_common::PreprocessingConfig;

const MIN_TEXT_CHARS: usize = 10;
const MIN_SENTENCE_CHARS: usize = 3;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)https?://\S+|www\.\S+|\b[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9-]+)*\.(?:com|org|net|edu|gov|io|co|uk|de)\b",
    )
    .unwrap()
});

static SOCIAL_HANDLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[@#][A-Za-z0-9_]+").unwrap());

static ELLIPSIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").unwrap());

static MISSING_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([.!?])([A-Za-z])").unwrap());

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.!?,:;])").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const CONTRACTIONS: &[(&str, &str)] = &[
    ("ain't", "are not"),
    ("aren't", "are not"),
    ("can't", "cannot"),
    ("couldn't", "could not"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he'd", "he would"),
    ("he'll", "he will"),
    ("he's", "he is"),
    ("i'd", "i would"),
    ("i'll", "i will"),
    ("i'm", "i am"),
    ("i've", "i have"),
    ("isn't", "is not"),
    ("it'd", "it would"),
    ("it'll", "it will"),
    ("it's", "it is"),
    ("let's", "let us"),
    ("shouldn't", "should not"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("they'd", "they would"),
    ("they'll", "they will"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("we'd", "we would"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("weren't", "were not"),
    ("what's", "what is"),
    ("where's", "where is"),
    ("who's", "who is"),
    ("won't", "will not"),
    ("wouldn't", "would not"),
    ("you'd", "you would"),
    ("you'll", "you will"),
    ("you're", "you are"),
    ("you've", "you have"),
];

static CONTRACTION: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = CONTRACTIONS.iter().map(|(c, _)| regex::escape(c)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|"))).unwrap()
});

// ============================================================================
// Report
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextQuality {
    Excellent,
    Good,
    Fair,
    Poor,
    Unusable,
}

impl TextQuality {
    fn from_score(score: i32) -> Self {
        match score {
            s if s >= 85 => Self::Excellent,
            s if s >= 70 => Self::Good,
            s if s >= 50 => Self::Fair,
            s if s >= 30 => Self::Poor,
            _ => Self::Unusable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextQualityReport {
    pub original_length: usize,
    pub processed_length: usize,
    pub quality_score: TextQuality,
    pub issues_found: Vec<String>,
    pub corrections_applied: Vec<String>,
    pub sentences_count: usize,
    pub words_count: usize,
    /// Negative when expansions lengthened the text
    pub chars_removed: i64,
}

// ============================================================================
// Preprocessor
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct TextPreprocessor {
    config: PreprocessingConfig,
}

impl TextPreprocessor {
    pub fn new(config: PreprocessingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PreprocessingConfig {
        &self.config
    }

    /// Clean `text` and report what was found and changed.
    pub fn preprocess(&self, text: &str) -> (String, TextQualityReport) {
        let original_length = text.chars().count();
        let mut issues = Vec::new();
        let mut corrections = Vec::new();
        let mut text = text.to_string();

        if original_length < MIN_TEXT_CHARS {
            issues.push(format!("Text too short ({original_length} chars)"));
        }

        if self.config.enabled {
            if original_length > self.config.max_length {
                issues.push(format!("Text too long ({original_length} chars), will be truncated"));
                text = text.chars().take(self.config.max_length).collect();
                corrections.push("Truncated to maximum length".to_string());
            }
            self.clean(&mut text, &mut corrections);
        }

        let quality = assess_quality(&text, issues.len());
        let processed_length = text.chars().count();
        let report = TextQualityReport {
            original_length,
            processed_length,
            quality_score: quality,
            issues_found: issues,
            corrections_applied: corrections,
            sentences_count: text
                .split(". ")
                .filter(|s| s.trim().chars().count() >= MIN_SENTENCE_CHARS)
                .count(),
            words_count: text.split_whitespace().count(),
            chars_removed: original_length as i64 - processed_length as i64,
        };

        tracing::debug!(
            original = report.original_length,
            processed = report.processed_length,
            quality = ?report.quality_score,
            corrections = report.corrections_applied.len(),
            "Text preprocessed"
        );
        (text, report)
    }

    fn clean(&self, text: &mut String, corrections: &mut Vec<String>) {
        let cfg = &self.config;

        if cfg.normalize_unicode {
            let normalized = normalize_characters(text);
            if normalized != *text {
                *text = normalized;
                corrections.push("Normalized Unicode".to_string());
            }
            let collapsed = ELLIPSIS.replace_all(text, "...").into_owned();
            if collapsed != *text {
                *text = collapsed;
                corrections.push("Normalized ellipses".to_string());
            }
        }

        // e-mail first, the bare-domain URL pattern would split addresses
        if cfg.remove_emails {
            remove_matches(text, &EMAIL, "email addresses", corrections);
        }
        if cfg.remove_urls {
            remove_matches(text, &URL, "URLs", corrections);
        }
        if cfg.remove_social_handles {
            remove_matches(text, &SOCIAL_HANDLE, "social media handles", corrections);
        }

        if cfg.fix_repeated_chars {
            let (squashed, sequences) = squash_repeats(text);
            if sequences > 0 {
                *text = squashed;
                corrections.push(format!("Fixed {sequences} repeated character sequences"));
            }
        }

        if cfg.expand_contractions {
            let mut seen = HashSet::new();
            let expanded = CONTRACTION
                .replace_all(text, |caps: &Captures| {
                    let found = caps[0].to_lowercase();
                    let expansion = CONTRACTIONS
                        .iter()
                        .find(|(c, _)| *c == found)
                        .map(|(_, e)| *e)
                        .unwrap_or_default();
                    seen.insert(found);
                    expansion.to_string()
                })
                .into_owned();
            if !seen.is_empty() {
                *text = expanded;
                corrections.push(format!("Expanded {} contractions", seen.len()));
            }
        }

        if cfg.fix_punctuation_spacing {
            let spaced = fix_missing_space(text);
            let fixed = SPACE_BEFORE_PUNCT.replace_all(&spaced, "$1").into_owned();
            if fixed != *text {
                *text = fixed;
                corrections.push("Fixed punctuation spacing".to_string());
            }
        }

        if cfg.normalize_whitespace {
            let collapsed = WHITESPACE.replace_all(text, " ").trim().to_string();
            if collapsed != *text {
                *text = collapsed;
                corrections.push("Normalized whitespace".to_string());
            }
        }
    }
}

/// Replace every match with a space and record the count.
fn remove_matches(text: &mut String, pattern: &Regex, what: &str, corrections: &mut Vec<String>) {
    let count = pattern.find_iter(text).count();
    if count > 0 {
        *text = pattern.replace_all(text, " ").into_owned();
        corrections.push(format!("Removed {count} {what}"));
    }
}

/// NFKC compatibility normalization, then typographic quotes and dashes
/// to their plain forms.
fn normalize_characters(text: &str) -> String {
    text.nfkc()
        .filter_map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{00AB}' | '\u{00BB}' => {
                Some('"')
            }
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '`' | '\u{00B4}' => {
                Some('\'')
            }
            '\u{2010}'..='\u{2015}' | '\u{2212}' => Some('-'),
            '\u{200B}' | '\u{FEFF}' => None,
            _ => Some(c),
        })
        .collect()
}

/// Insert the missing space after sentence punctuation ("end.Next"), leaving
/// single-letter abbreviation runs ("U.S.A", "e.g.") intact.
fn fix_missing_space(text: &str) -> String {
    MISSING_SPACE
        .replace_all(text, |caps: &Captures| {
            let at = caps.get(0).map_or(0, |m| m.start());
            if &caps[1] == "." && ends_with_single_letter(&text[..at]) {
                caps[0].to_string()
            } else {
                format!("{} {}", &caps[1], &caps[2])
            }
        })
        .into_owned()
}

fn ends_with_single_letter(before: &str) -> bool {
    let mut rev = before.chars().rev();
    match (rev.next(), rev.next()) {
        (Some(last), prev) => last.is_alphabetic() && prev.map_or(true, |p| !p.is_alphanumeric()),
        (None, _) => false,
    }
}

/// Cut runs of three or more identical characters down to two. Dots are
/// left alone so ellipses survive.
fn squash_repeats(text: &str) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut sequences = 0;
    let mut prev: Option<char> = None;
    let mut run = 0usize;
    for c in text.chars() {
        if c == '.' {
            prev = None;
            out.push(c);
            continue;
        }
        if Some(c) == prev {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run <= 2 {
            out.push(c);
        } else if run == 3 {
            sequences += 1;
        }
    }
    (out, sequences)
}

/// Quality band from issues, length, sentence structure and vocabulary
/// diversity.
fn assess_quality(text: &str, issues: usize) -> TextQuality {
    if text.trim().is_empty() {
        return TextQuality::Unusable;
    }

    let mut score = 100 - issues as i32 * 10;

    let length = text.chars().count();
    if length < 50 {
        score -= 20;
    } else if length < 100 {
        score -= 10;
    }

    if text.split('.').filter(|s| !s.trim().is_empty()).count() < 2 {
        score -= 15;
    }

    let words: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    if !words.is_empty() {
        let unique: HashSet<&String> = words.iter().collect();
        let ratio = unique.len() as f64 / words.len() as f64;
        if ratio < 0.3 {
            score -= 20;
        } else if ratio < 0.5 {
            score -= 10;
        }
    }

    TextQuality::from_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preprocess(text: &str) -> (String, TextQualityReport) {
        TextPreprocessor::default().preprocess(text)
    }

    #[test]
    fn test_removes_urls_and_emails() {
        let (text, report) = preprocess(
            "Visit https://example.com/page or www.docs.org today. Write to team@example.com for help.",
        );
        assert!(!text.contains("http"));
        assert!(!text.contains("www"));
        assert!(!text.contains('@'));
        assert!(text.contains("Write to for help."));
        assert!(report.corrections_applied.iter().any(|c| c == "Removed 2 URLs"));
        assert!(report
            .corrections_applied
            .iter()
            .any(|c| c == "Removed 1 email addresses"));
    }

    #[test]
    fn test_normalizes_typography() {
        let (text, _) = preprocess("\u{201C}Great\u{201D} \u{2014} it\u{2019}s fine\u{2026} really.....");
        assert_eq!(text, "\"Great\" - it's fine... really...");
    }

    #[test]
    fn test_nfkc_folds_compatibility_forms() {
        assert_eq!(normalize_characters("\u{FF21}\u{FF22}\u{FF23} \u{2460}"), "ABC 1");
        assert_eq!(normalize_characters("\u{FB01}ne\u{00A0}print"), "fine print");
        let (text, report) = preprocess("The \u{FF52}\u{FF45}\u{FF50}\u{FF4F}\u{FF52}\u{FF54} was great.");
        assert_eq!(text, "The report was great.");
        assert!(report.corrections_applied.iter().any(|c| c == "Normalized Unicode"));
    }

    #[test]
    fn test_squashes_repeats() {
        assert_eq!(squash_repeats("soooo goood!!!"), ("soo good!!".to_string(), 3));
        assert_eq!(squash_repeats("book"), ("book".to_string(), 0));
        assert_eq!(squash_repeats("wait..."), ("wait...".to_string(), 0));
    }

    #[test]
    fn test_punctuation_spacing() {
        let (text, _) = preprocess("The end.Next part starts here , and continues ; fine .");
        assert_eq!(text, "The end. Next part starts here, and continues; fine.");
    }

    #[test]
    fn test_punctuation_spacing_keeps_abbreviations() {
        assert_eq!(fix_missing_space("Made in the U.S.A today."), "Made in the U.S.A today.");
        assert_eq!(fix_missing_space("Fruit, e.g. apples."), "Fruit, e.g. apples.");
        assert_eq!(fix_missing_space("It ended.Then rain."), "It ended. Then rain.");
        assert_eq!(fix_missing_space("It works!Really."), "It works! Really.");
    }

    #[test]
    fn test_contractions_only_when_enabled() {
        let (text, _) = preprocess("It's late and we can't stay.");
        assert_eq!(text, "It's late and we can't stay.");

        let expanding = TextPreprocessor::new(PreprocessingConfig {
            expand_contractions: true,
            ..Default::default()
        });
        let (text, report) = expanding.preprocess("It's late and we can't stay.");
        assert_eq!(text, "it is late and we cannot stay.");
        assert!(report.corrections_applied.iter().any(|c| c == "Expanded 2 contractions"));
    }

    #[test]
    fn test_social_handles_optional() {
        let (text, _) = preprocess("Thanks @alice for the #launch update.");
        assert!(text.contains("@alice"));

        let removing = TextPreprocessor::new(PreprocessingConfig {
            remove_social_handles: true,
            ..Default::default()
        });
        let (text, _) = removing.preprocess("Thanks @alice for the #launch update.");
        assert_eq!(text, "Thanks for the update.");
    }

    #[test]
    fn test_truncation() {
        let short = TextPreprocessor::new(PreprocessingConfig {
            max_length: 20,
            ..Default::default()
        });
        let (text, report) = short.preprocess(&"word ".repeat(20));
        assert!(text.chars().count() <= 20);
        assert_eq!(report.issues_found.len(), 1);
        assert!(report.chars_removed > 0);
    }

    #[test]
    fn test_disabled_passthrough() {
        let off = TextPreprocessor::new(PreprocessingConfig {
            enabled: false,
            ..Default::default()
        });
        let input = "Visit  https://example.com  now!!!!";
        let (text, report) = off.preprocess(input);
        assert_eq!(text, input);
        assert!(report.corrections_applied.is_empty());
        assert_eq!(report.chars_removed, 0);
    }

    #[test]
    fn test_quality_bands() {
        assert_eq!(assess_quality("", 0), TextQuality::Unusable);
        assert_eq!(assess_quality("   ", 0), TextQuality::Unusable);

        let good_text = "Solar panels convert sunlight into electricity for homes. \
                         Wind turbines harvest energy from moving air across open plains.";
        assert_eq!(assess_quality(good_text, 0), TextQuality::Excellent);

        // short, one sentence: 100 - 20 - 15
        assert_eq!(assess_quality("Short note here", 0), TextQuality::Fair);

        // repetitive vocabulary
        let repetitive = "data data data data data data data data data data. data data data data.";
        assert_eq!(assess_quality(repetitive, 0), TextQuality::Good);
        assert_eq!(assess_quality(repetitive, 3), TextQuality::Poor);
    }

    #[test]
    fn test_report_counts() {
        let (_, report) = preprocess("First sentence here. Second one follows. Third.");
        assert_eq!(report.words_count, 7);
        assert_eq!(report.sentences_count, 3);
        assert_eq!(report.original_length, report.processed_length);
        // under 50 characters
        assert_eq!(report.quality_score, TextQuality::Good);
    }
}

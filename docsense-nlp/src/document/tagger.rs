//! Part-of-speech tagging and lemmatization.
//!
//! Closed-class words come from the lexicon; open-class words are resolved
//! from suffixes and the already-tagged left context, then a cleanup pass
//! settles the few ambiguous function words ("to", "that", "have", "do").

use super::lexicon::*;
use super::tokenize::{RawToken, TokenKind};
use super::PartOfSpeech;

/// Tag and lemma for one token.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tagged {
    pub pos: PartOfSpeech,
    pub lemma: String,
}

const MODALS: &[&str] = &[
    "can", "ca", "could", "will", "wo", "'ll", "would", "'d", "shall", "should", "may", "might",
    "must", "do", "does", "did",
];

const IRREGULAR_PLURALS: &[&str] = &[
    "children", "men", "women", "feet", "teeth", "mice", "geese", "criteria", "phenomena",
    "analyses", "hypotheses", "theses", "crises",
];

/// Tag a single sentence worth of tokens.
pub(crate) fn tag_sentence(tokens: &[RawToken]) -> Vec<Tagged> {
    let lowers: Vec<String> = tokens.iter().map(|t| t.text.to_lowercase()).collect();
    let first_word = tokens.iter().position(|t| t.kind == TokenKind::Word);

    let mut tags: Vec<Option<PartOfSpeech>> = (0..tokens.len())
        .map(|i| {
            let prev = i.checked_sub(1).map(|p| lowers[p].as_str());
            closed_class(&tokens[i], &lowers[i], prev)
        })
        .collect();

    for i in 0..tokens.len() {
        if tags[i].is_none() {
            let pos = open_class(i, tokens, &lowers, &tags, first_word == Some(i));
            tags[i] = Some(pos);
        }
    }

    let mut tags: Vec<PartOfSpeech> = tags
        .into_iter()
        .map(|t| t.unwrap_or(PartOfSpeech::X))
        .collect();
    resolve_function_words(&lowers, &mut tags);

    tokens
        .iter()
        .zip(&lowers)
        .zip(&tags)
        .map(|((token, lower), &pos)| Tagged {
            pos,
            lemma: lemmatize(&token.text, lower, pos),
        })
        .collect()
}

fn closed_class(token: &RawToken, lower: &str, prev: Option<&str>) -> Option<PartOfSpeech> {
    match token.kind {
        TokenKind::Punct => return Some(PartOfSpeech::Punct),
        TokenKind::Symbol if token.text.starts_with("http") => return Some(PartOfSpeech::X),
        TokenKind::Symbol => return Some(PartOfSpeech::Sym),
        TokenKind::Number => return Some(PartOfSpeech::Num),
        TokenKind::Word => {}
    }

    // Acronyms with periods ("U.S.") and titles ("Dr.")
    if lower.contains('.') {
        return Some(PartOfSpeech::Propn);
    }

    let pos = match lower {
        "n't" | "not" => PartOfSpeech::Part,
        "'s" => match prev {
            Some("it" | "he" | "she" | "that" | "there" | "what" | "who" | "here" | "where"
            | "how") => PartOfSpeech::Aux,
            _ => PartOfSpeech::Part,
        },
        "to" => PartOfSpeech::Adp,
        "that" => PartOfSpeech::Det,
        _ if AUXILIARIES.contains_key(lower) => PartOfSpeech::Aux,
        _ if POSSESSIVES.contains(lower) || PRONOUNS.contains(lower) => PartOfSpeech::Pron,
        _ if DETERMINERS.contains(lower) => PartOfSpeech::Det,
        _ if NUMBER_WORDS.contains(lower) => PartOfSpeech::Num,
        _ if COORDINATORS.contains(lower) => PartOfSpeech::Cconj,
        _ if SUBORDINATORS.contains(lower) => PartOfSpeech::Sconj,
        _ if ADPOSITIONS.contains(lower) => PartOfSpeech::Adp,
        _ if ADVERBS.contains(lower) => PartOfSpeech::Adv,
        _ if INTERJECTIONS.contains(lower) => PartOfSpeech::Intj,
        _ => return None,
    };
    Some(pos)
}

fn open_class(
    i: usize,
    tokens: &[RawToken],
    lowers: &[String],
    tags: &[Option<PartOfSpeech>],
    sentence_initial: bool,
) -> PartOfSpeech {
    use PartOfSpeech::*;

    let text = &tokens[i].text;
    let lower = lowers[i].as_str();
    let len = lower.chars().count();

    let prev = i.checked_sub(1).and_then(|p| tags[p]);
    let prev_lower = i.checked_sub(1).map(|p| lowers[p].as_str());
    // Nearest tag to the left, looking through adverbs and negation
    let prev_content = (0..i)
        .rev()
        .map(|p| (tags[p], lowers[p].as_str()))
        .find(|(t, _)| !matches!(t, Some(Adv) | Some(Part)))
        .and_then(|(t, l)| t.map(|t| (t, l)));
    let next_is_open = tokens.get(i + 1).is_some_and(|n| {
        n.kind == TokenKind::Word && tags.get(i + 1).is_some_and(Option::is_none)
    });
    let after_modifier = matches!(prev, Some(Det) | Some(Adj) | Some(Num))
        || prev_lower.is_some_and(|p| POSSESSIVES.contains(p));
    let after_subject = prev_content.is_some_and(|(t, l)| {
        (t == Pron && SUBJECT_PRONOUNS.contains(l)) || matches!(t, Noun | Propn)
    });
    let after_to = prev_lower == Some("to");

    // Proper nouns
    let first_upper = text.chars().next().is_some_and(char::is_uppercase);
    let all_upper = len >= 2 && text.chars().all(|c| !c.is_alphabetic() || c.is_uppercase());
    if all_upper {
        return Propn;
    }
    if first_upper {
        if !sentence_initial {
            return Propn;
        }
        let next_upper = tokens.get(i + 1).is_some_and(|n| {
            n.kind == TokenKind::Word
                && n.text.chars().next().is_some_and(char::is_uppercase)
                && tags.get(i + 1).is_some_and(Option::is_none)
        });
        if next_upper || PLACES.contains(lower) || NATIONALITIES.contains(lower) {
            return Propn;
        }
    }

    if IRREGULAR_PLURALS.contains(&lower) {
        return Noun;
    }
    if COMMON_ADJECTIVES.contains(lower) || is_graded_adjective(lower) {
        return Adj;
    }
    if ADJECTIVAL_PARTICIPLES.contains(lower) {
        return if matches!(prev, Some(Pron) | Some(Noun) | Some(Propn)) && !after_modifier {
            Verb
        } else {
            Adj
        };
    }
    if IRREGULAR_LEMMAS.contains_key(lower) {
        return if after_modifier { Adj } else { Verb };
    }

    if len > 4 && lower.ends_with("ly") {
        if LY_NOUNS.contains(lower) {
            return Noun;
        }
        if LY_ADJECTIVES.contains(lower) {
            return Adj;
        }
        return Adv;
    }

    if len > 4 && lower.ends_with("ing") {
        let stem_len = len - 3;
        if ING_NOUNS.contains(lower) || stem_len < 3 {
            return Noun;
        }
        if after_modifier || matches!(prev, Some(Adp)) && !after_to {
            return if next_is_open { Adj } else { Noun };
        }
        return Verb;
    }

    if len > 4 && lower.ends_with("ed") && !lower.ends_with("eed") {
        if after_modifier && next_is_open {
            return Adj;
        }
        return Verb;
    }

    if COMMON_VERBS.contains(lower) {
        if after_to {
            return Verb;
        }
        if after_modifier || matches!(prev, Some(Adp)) {
            return Noun;
        }
        return Verb;
    }

    if after_to && has_verb_suffix(lower) {
        return Verb;
    }

    // Third person singular after a subject ("the sky appears")
    if let Some(base) = third_person_base(lower) {
        if !after_modifier && after_subject {
            let next_closed = tokens.get(i + 1).map_or(true, |n| {
                n.kind != TokenKind::Word
                    || tags.get(i + 1).is_some_and(Option::is_some)
                    || n.text.chars().next().is_some_and(char::is_uppercase)
            });
            if COMMON_VERBS.contains(base.as_str()) || next_closed {
                return Verb;
            }
        }
    }

    let singular = singularize(lower);
    if let Some(pos) = suffix_class(&singular, len) {
        if pos == Adj && after_modifier && !next_is_open {
            return Noun;
        }
        return pos;
    }

    let after_modal = prev_lower.is_some_and(|p| MODALS.contains(&p));
    if after_modal || (after_to && !after_modifier) {
        return Verb;
    }
    if !after_modifier
        && prev_content.is_some_and(|(t, l)| t == Pron && SUBJECT_PRONOUNS.contains(l))
        && matches!(prev, Some(Pron) | Some(Adv))
    {
        return Verb;
    }
    Noun
}

fn suffix_class(word: &str, len: usize) -> Option<PartOfSpeech> {
    use PartOfSpeech::*;

    const ADJ_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ical"];
    const NOUN_SUFFIXES: &[&str] = &[
        "tion", "sion", "ment", "ness", "ity", "ism", "ist", "ance", "ence", "ship", "hood",
        "ology", "er", "or", "ure", "age", "dom", "cy",
    ];

    if len <= 4 {
        return None;
    }
    if ADJ_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return Some(Adj);
    }
    if (word.ends_with("al") || word.ends_with("ic")) && !AL_IC_NOUNS.contains(word) {
        return Some(Adj);
    }
    if len > 5 && word.ends_with("ish") {
        return Some(Adj);
    }
    if NOUN_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return Some(Noun);
    }
    None
}

fn has_verb_suffix(word: &str) -> bool {
    ["ize", "ise", "ate", "ify", "en"]
        .iter()
        .any(|s| word.len() > 4 && word.ends_with(s))
}

fn third_person_base(word: &str) -> Option<String> {
    if word.len() <= 3 || !word.ends_with('s') || INVARIANT_S.contains(word) {
        return None;
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return None;
    }
    Some(verb_lemma(word))
}

fn is_graded_adjective(word: &str) -> bool {
    let lemma = adjective_lemma(word);
    lemma != word && COMMON_ADJECTIVES.contains(lemma.as_str())
}

/// Settle "to", "that", "like" and the have/do auxiliaries once neighbours are known.
fn resolve_function_words(lowers: &[String], tags: &mut [PartOfSpeech]) {
    use PartOfSpeech::*;

    for i in 0..tags.len() {
        let next = tags.get(i + 1).copied();
        let prev = i.checked_sub(1).map(|p| tags[p]);
        match lowers[i].as_str() {
            "to" => {
                if next == Some(Verb) {
                    tags[i] = Part;
                }
            }
            "that" => {
                let det_context = matches!(next, Some(Noun | Propn | Adj | Num))
                    && !matches!(prev, Some(Verb));
                if !det_context {
                    tags[i] = if matches!(prev, Some(Verb | Adj)) { Sconj } else { Pron };
                }
            }
            "like" => {
                let subject = (0..i)
                    .rev()
                    .find(|&p| {
                        !matches!(tags[p], Adv | Part) && !MODALS.contains(&lowers[p].as_str())
                    })
                    .is_some_and(|p| {
                        tags[p] == Pron && SUBJECT_PRONOUNS.contains(lowers[p].as_str())
                    });
                if subject {
                    tags[i] = Verb;
                }
            }
            _ => {}
        }
    }

    for i in 0..tags.len() {
        if matches!(
            lowers[i].as_str(),
            "have" | "has" | "had" | "having" | "do" | "does" | "did"
        ) {
            let governs_verb = tags[i + 1..]
                .iter()
                .take(3)
                .find(|t| !matches!(t, Adv | Part | Pron))
                .is_some_and(|t| *t == Verb);
            tags[i] = if governs_verb { Aux } else { Verb };
        }
    }
}

// ============================================================================
// Lemmatization
// ============================================================================

fn lemmatize(text: &str, lower: &str, pos: PartOfSpeech) -> String {
    use PartOfSpeech::*;

    match pos {
        Punct | Sym | Num | X => text.to_string(),
        Propn => text.to_string(),
        Aux => AUXILIARIES
            .get(lower)
            .map(|l| l.to_string())
            .unwrap_or_else(|| if lower == "'s" { "be".into() } else { lower.into() }),
        Part => {
            if lower == "n't" {
                "not".into()
            } else {
                lower.into()
            }
        }
        Pron | Det | Adp | Cconj | Sconj | Intj | Adv => lower.to_string(),
        Noun | Verb | Adj => {
            if pos == Verb {
                if let Some(base) = AUXILIARIES.get(lower) {
                    return base.to_string();
                }
            }
            if let Some(lemma) = IRREGULAR_LEMMAS.get(lower) {
                return lemma.to_string();
            }
            match pos {
                Noun => singularize(lower),
                Verb => verb_lemma(lower),
                _ => adjective_lemma(lower),
            }
        }
    }
}

fn is_vowel(c: u8) -> bool {
    matches!(c, b'a' | b'e' | b'i' | b'o' | b'u')
}

/// Plural noun to singular.
pub(crate) fn singularize(word: &str) -> String {
    if word.len() <= 3 || !word.ends_with('s') || INVARIANT_S.contains(word) {
        return word.to_string();
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }
    for suffix in ["sses", "xes", "ches", "shes", "zzes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    word[..word.len() - 1].to_string()
}

/// Inflected verb to its base form.
pub(crate) fn verb_lemma(word: &str) -> String {
    if !word.is_ascii() {
        return word.to_string();
    }
    if let Some(lemma) = IRREGULAR_LEMMAS.get(word) {
        return lemma.to_string();
    }
    match word {
        "goes" => return "go".into(),
        "dying" => return "die".into(),
        "lying" => return "lie".into(),
        "tying" => return "tie".into(),
        _ => {}
    }

    let n = word.len();
    if n > 4 && (word.ends_with("ies") || word.ends_with("ied")) {
        return format!("{}y", &word[..n - 3]);
    }
    if n > 5 && word.ends_with("ing") {
        return restore_stem(&word[..n - 3]);
    }
    if n > 4 && word.ends_with("ed") && !word.ends_with("eed") {
        return restore_stem(&word[..n - 2]);
    }
    if n > 4 && word.ends_with("es") {
        let stem = &word[..n - 2];
        if stem.ends_with(['s', 'x', 'z']) || stem.ends_with("ch") || stem.ends_with("sh") {
            return stem.to_string();
        }
    }
    if n > 3 && word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") {
        return word[..n - 1].to_string();
    }
    word.to_string()
}

fn restore_stem(stem: &str) -> String {
    let b = stem.as_bytes();
    let n = b.len();
    if n > 3 {
        let last = b[n - 1];
        if last == b[n - 2] && !is_vowel(last) && !matches!(last, b'l' | b's' | b'z' | b'f') {
            return stem[..n - 1].to_string();
        }
    }
    if needs_silent_e(stem) {
        format!("{stem}e")
    } else {
        stem.to_string()
    }
}

fn needs_silent_e(stem: &str) -> bool {
    if NO_SILENT_E.contains(stem) {
        return false;
    }
    let b = stem.as_bytes();
    let n = b.len();
    if n < 2 {
        return false;
    }
    let last = b[n - 1];
    let prev = b[n - 2];
    let before = (n >= 3).then(|| b[n - 3]);
    let consonant_before = before.is_some_and(|c| !is_vowel(c));

    let by_ending = match last {
        b'v' | b'c' | b'u' => true,
        b'z' => prev != b'z',
        b'g' => {
            matches!(prev, b'd' | b'r')
                || (matches!(prev, b'a' | b'u') && consonant_before)
                || (prev == b'n' && matches!(before, Some(b'a' | b'e' | b'u')))
        }
        b'h' => prev == b't',
        b'l' => {
            matches!(prev, b'b' | b'p' | b't' | b'g' | b'k' | b'd' | b'f' | b'z')
                || (matches!(prev, b'u' | b'i') && consonant_before && n > 3)
        }
        b'r' => {
            (matches!(prev, b'u' | b'i' | b'a' | b'o') && consonant_before)
                || stem.ends_with("quir")
        }
        b's' => {
            (is_vowel(prev) && !(prev == b'u' && n > 4))
                || matches!(prev, b'n' | b'r' | b'p' | b'l')
        }
        b't' => {
            (prev == b'a' && n > 3)
                || (prev == b'u' && n > 4)
                || (prev == b'i' && matches!(before, Some(b'c' | b'v' | b'n')))
        }
        b'd' => prev == b'i' && consonant_before,
        b'k' => matches!(prev, b'o' | b'a' | b'i') && consonant_before,
        b'm' => (matches!(prev, b'u' | b'a' | b'i') && consonant_before) || stem.ends_with("com"),
        b'n' => prev == b'i' && consonant_before,
        b'p' => matches!(prev, b'a' | b'i') && consonant_before,
        b'b' => matches!(prev, b'i' | b'o' | b'u') && consonant_before,
        _ => false,
    };

    let short_cvc = n == 3
        && !is_vowel(b[0])
        && is_vowel(b[1])
        && !is_vowel(b[2])
        && !matches!(b[2], b'w' | b'x' | b'y');

    by_ending || short_cvc
}

/// Comparative or superlative adjective to its positive form.
pub(crate) fn adjective_lemma(word: &str) -> String {
    match word {
        "better" | "best" => return "good".into(),
        "worse" | "worst" => return "bad".into(),
        _ => {}
    }
    if !word.is_ascii() {
        return word.to_string();
    }
    for (suffix, keep) in [("iest", 4), ("ier", 3)] {
        if word.len() > keep + 1 && word.ends_with(suffix) {
            let candidate = format!("{}y", &word[..word.len() - keep]);
            if COMMON_ADJECTIVES.contains(candidate.as_str()) {
                return candidate;
            }
        }
    }
    for suffix in ["est", "er"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.len() < 2 {
                continue;
            }
            let b = stem.as_bytes();
            let undoubled = if b.len() > 2 && b[b.len() - 1] == b[b.len() - 2] {
                Some(&stem[..stem.len() - 1])
            } else {
                None
            };
            let with_e = format!("{stem}e");
            for candidate in [Some(stem), Some(with_e.as_str()), undoubled].into_iter().flatten() {
                if COMMON_ADJECTIVES.contains(candidate) {
                    return candidate.to_string();
                }
            }
        }
    }
    word.to_string()
}

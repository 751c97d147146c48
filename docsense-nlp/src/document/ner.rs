//! Named entity recognition over tagged tokens.

use super::lexicon::{
    CURRENCY_WORDS, GEO_SUFFIXES, MONTHS, NATIONALITIES, ORG_SUFFIXES, PERSON_TITLES, PLACES,
    WEEKDAYS,
};
use super::{EntityLabel, PartOfSpeech};

const CURRENCY_SYMBOLS: &[&str] = &["$", "€", "£", "¥"];
const NAME_CONNECTORS: &[&str] = &["of", "the", "van", "von", "de", "da", "la", "del"];
const COUNTRY_ACRONYMS: &[&str] = &["US", "UK", "USA", "U.S.", "U.K.", "EU", "UAE"];
const RELATIVE_DAYS: &[&str] = &["today", "yesterday", "tomorrow"];

/// A recognised span as a half-open token range local to the sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EntityRange {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
}

/// Find entity spans in one sentence.
pub(crate) fn find_entities(texts: &[String], pos: &[PartOfSpeech]) -> Vec<EntityRange> {
    let lowers: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();
    let n = texts.len();
    let mut found = Vec::new();
    let mut i = 0;

    while i < n {
        let span = numeric_entity(texts, &lowers, pos, i)
            .or_else(|| date_entity(texts, &lowers, pos, i))
            .or_else(|| name_entity(texts, &lowers, pos, i));

        match span {
            Some(range) => {
                i = range.end.max(i + 1);
                found.push(range);
            }
            None => i += 1,
        }
    }
    found
}

fn is_capitalized(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

fn numeric_entity(
    texts: &[String],
    lowers: &[String],
    pos: &[PartOfSpeech],
    i: usize,
) -> Option<EntityRange> {
    let n = texts.len();
    let num_run_end = |from: usize| (from..n).find(|&j| pos[j] != PartOfSpeech::Num).unwrap_or(n);

    // $3.5 million
    if CURRENCY_SYMBOLS.contains(&texts[i].as_str()) {
        if pos.get(i + 1) == Some(&PartOfSpeech::Num) {
            return Some(EntityRange {
                start: i,
                end: num_run_end(i + 1),
                label: EntityLabel::Money,
            });
        }
        return None;
    }
    if pos[i] != PartOfSpeech::Num {
        return None;
    }

    let end = num_run_end(i);
    let next = lowers.get(end).map(String::as_str);
    let range = |end: usize, label: EntityLabel| {
        Some(EntityRange {
            start: i,
            end,
            label,
        })
    };

    if matches!(next, Some("%" | "percent")) {
        return range(end + 1, EntityLabel::Percent);
    }
    if next.is_some_and(|w| CURRENCY_WORDS.contains(w)) {
        return range(end + 1, EntityLabel::Money);
    }
    if next.is_some_and(|w| MONTHS.contains(w)) && is_capitalized(&texts[end]) {
        return date_entity(texts, lowers, pos, end).map(|d| EntityRange { start: i, ..d });
    }

    let first = texts[i].as_str();
    if first.contains(':') {
        return range(end, EntityLabel::Time);
    }
    if end == i + 1 && is_year(first) {
        return range(end, EntityLabel::Date);
    }
    range(end, EntityLabel::Cardinal)
}

fn is_year(text: &str) -> bool {
    let digits = text.strip_suffix('s').unwrap_or(text);
    digits.len() == 4
        && digits
            .parse::<u32>()
            .is_ok_and(|y| (1000..=2099).contains(&y))
}

fn date_entity(
    texts: &[String],
    lowers: &[String],
    pos: &[PartOfSpeech],
    i: usize,
) -> Option<EntityRange> {
    let lower = lowers[i].as_str();
    let n = texts.len();

    if RELATIVE_DAYS.contains(&lower) || (WEEKDAYS.contains(lower) && is_capitalized(&texts[i])) {
        return Some(EntityRange {
            start: i,
            end: i + 1,
            label: EntityLabel::Date,
        });
    }
    if !(MONTHS.contains(lower) && is_capitalized(&texts[i])) {
        return None;
    }

    let is_num = |j: usize| j < n && pos[j] == PartOfSpeech::Num;
    let mut end = i + 1;
    if is_num(end) {
        end += 1;
        if end + 1 < n && texts[end] == "," && is_num(end + 1) && is_year(&texts[end + 1]) {
            end += 2;
        }
    } else if lower == "may" || lower == "march" {
        // Modal or verb unless a day or year follows
        return None;
    }

    Some(EntityRange {
        start: i,
        end,
        label: EntityLabel::Date,
    })
}

fn name_entity(
    texts: &[String],
    lowers: &[String],
    pos: &[PartOfSpeech],
    i: usize,
) -> Option<EntityRange> {
    if pos[i] != PartOfSpeech::Propn {
        return None;
    }
    let n = texts.len();

    let mut end = i + 1;
    while end < n {
        if pos[end] == PartOfSpeech::Propn {
            end += 1;
        } else if NAME_CONNECTORS.contains(&lowers[end].as_str())
            && pos.get(end + 1) == Some(&PartOfSpeech::Propn)
        {
            end += 2;
        } else {
            break;
        }
    }

    let mut start = i;
    let mut titled = i > 0 && PERSON_TITLES.contains(lowers[i - 1].as_str());
    if PERSON_TITLES.contains(lowers[start].as_str()) && end - start > 1 {
        start += 1;
        titled = true;
    }

    let words = &lowers[start..end];
    let surface = &texts[start..end];
    let last = words.last()?.as_str();
    let len = end - start;
    let has_connector = words.iter().any(|w| NAME_CONNECTORS.contains(&w.as_str()));

    let label = if titled {
        EntityLabel::Person
    } else if words.iter().any(|w| ORG_SUFFIXES.contains(w.as_str())) {
        EntityLabel::Org
    } else if len == 1 && COUNTRY_ACRONYMS.contains(&surface[0].as_str()) {
        EntityLabel::Gpe
    } else if len == 1
        && surface[0].chars().count() >= 2
        && surface[0].chars().all(|c| !c.is_alphabetic() || c.is_uppercase())
    {
        EntityLabel::Org
    } else if GEO_SUFFIXES.contains(last) {
        EntityLabel::Loc
    } else if len <= 3 && words.iter().any(|w| PLACES.contains(w.as_str())) {
        EntityLabel::Gpe
    } else if len == 1 && NATIONALITIES.contains(last) {
        EntityLabel::Norp
    } else if len <= 3 && !has_connector {
        EntityLabel::Person
    } else {
        EntityLabel::Org
    };

    Some(EntityRange { start, end, label })
}

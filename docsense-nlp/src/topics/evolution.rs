use serde::Serialize;
use std::collections::HashMap;

use docsense_common::util::round_to;

use super::Topic;

const MIN_SENTENCES: usize = 5;
const MIN_WINDOW: usize = 5;
const INTENSITY_SCALE: f64 = 10.0;

/// Half-open sentence index range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentenceRange {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicEvolutionPoint {
    pub topic_id: String,
    pub sentence_range: SentenceRange,
    pub intensity: f64,
}

/// Overlapping windows of `max(5, n/4)` sentences, overlapping by a third.
pub fn segments(sentence_count: usize) -> Vec<SentenceRange> {
    let window = MIN_WINDOW.max(sentence_count / 4);
    let step = (window - window / 3).max(1);
    let mut out = Vec::new();
    let mut start = 0;
    while start < sentence_count {
        let end = (start + window).min(sentence_count);
        out.push(SentenceRange { start, end });
        if end == sentence_count {
            break;
        }
        start += step;
    }
    out
}

/// Keyword matches in a bag of terms. A multi-word keyword counts only
/// when all of its parts occur, as often as its rarest part.
fn keyword_matches(keyword: &str, counts: &HashMap<&str, usize>) -> usize {
    let parts: Vec<&str> = keyword.split_whitespace().collect();
    parts
        .iter()
        .map(|p| counts.get(p).copied().unwrap_or(0))
        .min()
        .unwrap_or(0)
}

/// Intensity of every topic in every segment.
///
/// `sentences` holds the filtered terms of every sentence in document
/// order. Returns nothing for fewer than 5 sentences or a single segment.
pub fn track(sentences: &[Vec<String>], topics: &[Topic]) -> Vec<TopicEvolutionPoint> {
    if sentences.len() < MIN_SENTENCES || topics.is_empty() {
        return Vec::new();
    }
    let ranges = segments(sentences.len());
    if ranges.len() < 2 {
        return Vec::new();
    }

    let mut points = Vec::with_capacity(ranges.len() * topics.len());
    for range in ranges {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut total = 0usize;
        for term in sentences[range.start..range.end].iter().flatten() {
            *counts.entry(term.as_str()).or_insert(0) += 1;
            total += 1;
        }

        for topic in topics {
            let matches: usize = topic
                .keywords
                .iter()
                .map(|k| keyword_matches(k, &counts))
                .sum();
            let intensity = if total == 0 {
                0.0
            } else {
                (matches as f64 / total as f64 * INTENSITY_SCALE).min(1.0)
            };
            points.push(TopicEvolutionPoint {
                topic_id: topic.id.clone(),
                sentence_range: range,
                intensity: round_to(intensity, 3),
            });
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: &str, keywords: &[&str]) -> Topic {
        Topic {
            id: id.to_string(),
            label: String::new(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            percentage: 0.0,
            coherence: 0.0,
            description: String::new(),
        }
    }

    fn sentence(words: &str) -> Vec<String> {
        words.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_segments() {
        assert_eq!(segments(5), vec![SentenceRange { start: 0, end: 5 }]);
        assert_eq!(
            segments(8),
            vec![
                SentenceRange { start: 0, end: 5 },
                SentenceRange { start: 4, end: 8 }
            ]
        );
        // n = 40: window 10, overlap 3, step 7
        let s = segments(40);
        assert_eq!(s[0], SentenceRange { start: 0, end: 10 });
        assert_eq!(s[1], SentenceRange { start: 7, end: 17 });
        assert_eq!(s.last().map(|r| r.end), Some(40));
    }

    #[test]
    fn test_skipped_for_short_documents() {
        let sentences: Vec<Vec<String>> = (0..5).map(|_| sentence("cat dog")).collect();
        assert!(track(&sentences, &[topic("topic_1", &["cat"])]).is_empty());
    }

    #[test]
    fn test_intensity_tracks_topic_shift() {
        let mut sentences: Vec<Vec<String>> =
            (0..5).map(|_| sentence("market price stock")).collect();
        sentences.extend((0..5).map(|_| sentence("garden flower soil")));
        let topics = [
            topic("topic_1", &["market", "stock price"]),
            topic("topic_2", &["garden"]),
        ];
        let points = track(&sentences, &topics);
        // windows (0,5) (4,9) (8,10), two topics each
        assert_eq!(points.len(), 6);
        assert_eq!(points[0].topic_id, "topic_1");
        assert_eq!(points[0].intensity, 1.0);
        assert_eq!(points[1].intensity, 0.0);
        let last_garden = points.iter().rev().find(|p| p.topic_id == "topic_2").unwrap();
        assert_eq!(last_garden.intensity, 1.0);
        assert!(points.iter().all(|p| (0.0..=1.0).contains(&p.intensity)));
    }

    #[test]
    fn test_multi_word_keyword_needs_all_parts() {
        let counts: HashMap<&str, usize> = [("stock", 3), ("price", 1)].into_iter().collect();
        assert_eq!(keyword_matches("stock price", &counts), 1);
        assert_eq!(keyword_matches("stock market", &counts), 0);
        assert_eq!(keyword_matches("stock", &counts), 3);
    }
}

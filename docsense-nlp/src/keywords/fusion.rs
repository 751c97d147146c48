use std::collections::HashMap;

use super::Keyword;

/// Boosts for terms found by more than one source.
const MULTI_SOURCE_WEIGHT_BOOST: f64 = 1.3;
const MULTI_SOURCE_RELEVANCE_BOOST: f64 = 1.2;

/// Merge keyword lists by lower-cased term.
///
/// A term seen in several sources gets the mean of their weights and
/// relevances, then a boost. Frequency comes from the first source that
/// reported the term. The result is sorted by weight and truncated to
/// `limit`.
pub fn fuse(sources: Vec<Vec<Keyword>>, limit: usize) -> Vec<Keyword> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<Keyword> = Vec::new();

    for keywords in sources {
        for keyword in keywords {
            let key = keyword.term.to_lowercase();
            match index.get(&key) {
                Some(&slot) => {
                    let existing = &mut merged[slot];
                    if keyword.sources.is_subset(&existing.sources) {
                        continue;
                    }
                    existing.weight = (existing.weight + keyword.weight) / 2.0;
                    existing.relevance = (existing.relevance + keyword.relevance) / 2.0;
                    existing.sources.extend(keyword.sources);
                }
                None => {
                    index.insert(key.clone(), merged.len());
                    merged.push(Keyword { term: key, ..keyword });
                }
            }
        }
    }

    for keyword in &mut merged {
        if keyword.sources.len() > 1 {
            keyword.weight *= MULTI_SOURCE_WEIGHT_BOOST;
            keyword.relevance *= MULTI_SOURCE_RELEVANCE_BOOST;
        }
    }

    merged.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    merged.truncate(limit);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::KeywordSource;
    use std::collections::HashSet;

    fn kw(term: &str, weight: f64, source: KeywordSource) -> Keyword {
        Keyword::new(term.to_string(), 1, weight / 10.0, weight, source)
    }

    #[test]
    fn test_dual_source_average_and_boost() {
        let frequency = vec![kw("energy", 4.0, KeywordSource::Frequency)];
        let statistical = vec![kw("Energy", 8.0, KeywordSource::Statistical)];
        let fused = fuse(vec![frequency, statistical], 15);

        assert_eq!(fused.len(), 1);
        let energy = &fused[0];
        assert_eq!(energy.term, "energy");
        assert!((energy.weight - 6.0 * 1.3).abs() < 1e-9);
        assert!((energy.relevance - 0.6 * 1.2).abs() < 1e-9);
        assert!(energy.sources.contains(&KeywordSource::Frequency));
        assert!(energy.sources.contains(&KeywordSource::Statistical));
    }

    #[test]
    fn test_terms_unique_and_sorted() {
        let frequency = vec![
            kw("solar", 3.0, KeywordSource::Frequency),
            kw("wind", 2.0, KeywordSource::Frequency),
        ];
        let statistical = vec![
            kw("wind", 9.0, KeywordSource::Statistical),
            kw("WIND", 1.0, KeywordSource::Statistical),
            kw("solar panels", 5.0, KeywordSource::Statistical),
        ];
        let fused = fuse(vec![frequency, statistical], 15);

        let terms: HashSet<&str> = fused.iter().map(|k| k.term.as_str()).collect();
        assert_eq!(terms.len(), fused.len());
        assert_eq!(fused[0].term, "wind");
        assert!((fused[0].weight - 5.5 * 1.3).abs() < 1e-9);
        for pair in fused.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
    }

    #[test]
    fn test_limit() {
        let many: Vec<Keyword> = (0..30)
            .map(|i| kw(&format!("term{i}"), i as f64, KeywordSource::Frequency))
            .collect();
        let fused = fuse(vec![many, Vec::new()], 15);
        assert_eq!(fused.len(), 15);
        assert_eq!(fused[0].term, "term29");
    }
}

use std::collections::HashMap;

/// Sentence-by-feature TF-IDF matrix with L2-normalised rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfMatrix {
    /// Feature names in column order (alphabetical)
    pub vocabulary: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

/// Unigrams plus bigrams of adjacent terms.
fn features(terms: &[String]) -> Vec<String> {
    let mut out: Vec<String> = terms.to_vec();
    out.extend(terms.windows(2).map(|w| format!("{} {}", w[0], w[1])));
    out
}

/// Build the matrix over the `max_features` most frequent features.
///
/// Ties in corpus frequency are broken alphabetically. Idf is smoothed:
/// `ln((1 + n) / (1 + df)) + 1`.
pub fn vectorize(documents: &[Vec<String>], max_features: usize) -> TfidfMatrix {
    let per_doc: Vec<HashMap<String, usize>> = documents
        .iter()
        .map(|terms| {
            let mut counts = HashMap::new();
            for feature in features(terms) {
                *counts.entry(feature).or_insert(0usize) += 1;
            }
            counts
        })
        .collect();

    let mut corpus: HashMap<&str, (usize, usize)> = HashMap::new();
    for counts in &per_doc {
        for (feature, &count) in counts {
            let entry = corpus.entry(feature.as_str()).or_insert((0, 0));
            entry.0 += count;
            entry.1 += 1;
        }
    }

    let mut ranked: Vec<(&str, usize, usize)> =
        corpus.into_iter().map(|(f, (tf, df))| (f, tf, df)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(max_features);
    ranked.sort_by(|a, b| a.0.cmp(b.0));

    let n = documents.len() as f64;
    let idf: Vec<f64> = ranked
        .iter()
        .map(|&(_, _, df)| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
        .collect();

    let rows = per_doc
        .iter()
        .map(|counts| {
            let mut row: Vec<f64> = ranked
                .iter()
                .zip(&idf)
                .map(|(&(feature, _, _), w)| counts.get(feature).copied().unwrap_or(0) as f64 * w)
                .collect();
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.iter_mut().for_each(|v| *v /= norm);
            }
            row
        })
        .collect();

    TfidfMatrix {
        vocabulary: ranked.into_iter().map(|(f, _, _)| f.to_string()).collect(),
        rows,
    }
}

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{L}[\p{L}']*").unwrap());
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)*%?").unwrap());

const FACTUAL: &[&str] = &[
    "according", "reported", "report", "reports", "found", "show", "shows", "showed",
    "indicate", "indicates", "indicated", "measured", "recorded", "percent", "statistic",
    "statistics", "evidence", "survey", "observed", "estimated", "approximately", "total",
    "average", "rate", "number", "figure", "figures",
];
const ACADEMIC: &[&str] = &[
    "research", "study", "studies", "analysis", "data", "findings", "conclusion", "hypothesis",
    "methodology", "results", "sample", "participants", "experiment", "significant",
    "correlation",
];
const TEMPORAL: &[&str] = &[
    "year", "years", "month", "months", "quarter", "annual", "annually", "decade", "century",
    "period", "since", "during", "between", "date",
];

/// Scale applied to the raw indicator density.
const DENSITY_SCALE: f64 = 3.0;

/// Indicator words for objective, data-driven prose.
#[derive(Debug, Clone)]
pub struct FactualLexicon {
    indicators: HashSet<String>,
}

impl Default for FactualLexicon {
    fn default() -> Self {
        Self {
            indicators: FACTUAL
                .iter()
                .chain(ACADEMIC)
                .chain(TEMPORAL)
                .map(|w| w.to_string())
                .collect(),
        }
    }
}

impl FactualLexicon {
    pub fn with_indicator(mut self, word: &str) -> Self {
        self.indicators.insert(word.to_lowercase());
        self
    }

    pub fn contains(&self, word: &str) -> bool {
        self.indicators.contains(word)
    }
}

/// Heuristic factual-content score in [0, 1].
#[derive(Debug, Clone, Default)]
pub struct FactualContentDetector {
    lexicon: FactualLexicon,
}

impl FactualContentDetector {
    pub fn new(lexicon: FactualLexicon) -> Self {
        Self { lexicon }
    }

    /// Indicator and numeric hits per word, scaled and capped at 1.
    pub fn score(&self, text: &str) -> f64 {
        let numbers = NUMERIC.find_iter(text).count();
        let mut words = numbers;
        let mut hits = numbers;
        for m in WORD.find_iter(text) {
            words += 1;
            if self.lexicon.contains(&m.as_str().to_lowercase()) {
                hits += 1;
            }
        }
        if words == 0 {
            return 0.0;
        }
        (hits as f64 / words as f64 * DENSITY_SCALE).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistical_text_is_factual() {
        let detector = FactualContentDetector::default();
        let text = "According to research, the study found that 45% of data points were \
                    recorded during the year 2020.";
        assert!(detector.score(text) > 0.5);
    }

    #[test]
    fn test_opinion_is_not_factual() {
        let detector = FactualContentDetector::default();
        assert!(detector.score("I absolutely love this wonderful little cafe!") < 0.1);
        assert_eq!(detector.score(""), 0.0);
        assert_eq!(detector.score("!!! ???"), 0.0);
    }

    #[test]
    fn test_custom_indicator() {
        let detector =
            FactualContentDetector::new(FactualLexicon::default().with_indicator("Ledger"));
        assert!(detector.score("ledger ledger") > 0.99);
    }
}

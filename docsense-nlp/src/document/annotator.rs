use super::lexicon::STOP_WORDS;
use super::ner::find_entities;
use super::parser::parse_sentence;
use super::tagger::tag_sentence;
use super::tokenize::{split_sentences, tokenize, TokenKind};
use super::{
    AnnotatedDocument, AnnotatedToken, AnnotationError, DocumentAnnotator, EntitySpan, NounChunk,
    PartOfSpeech, Sentence,
};

/// Built-in annotator: regex tokenizer, lexicon tagger, shallow parser and
/// pattern-based entity recognition.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedAnnotator;

impl RuleBasedAnnotator {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentAnnotator for RuleBasedAnnotator {
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument, AnnotationError> {
        if text.trim().is_empty() {
            return Err(AnnotationError::Empty);
        }

        let raw = tokenize(text);
        if raw.is_empty() {
            return Err(AnnotationError::Empty);
        }

        let mut doc = AnnotatedDocument {
            text: text.to_string(),
            ..Default::default()
        };

        for (sentence_idx, (start, end)) in split_sentences(text, &raw).into_iter().enumerate() {
            let slice = &raw[start..end];
            let tagged = tag_sentence(slice);

            let words: Vec<String> = slice.iter().map(|t| t.text.to_lowercase()).collect();
            let lemmas: Vec<String> = tagged.iter().map(|t| t.lemma.to_lowercase()).collect();
            let pos: Vec<PartOfSpeech> = tagged.iter().map(|t| t.pos).collect();
            let parsed = parse_sentence(&words, &lemmas, &pos);

            for (local, (token, tag)) in slice.iter().zip(&tagged).enumerate() {
                let is_punct = token.kind == TokenKind::Punct;
                doc.tokens.push(AnnotatedToken {
                    index: start + local,
                    text: token.text.clone(),
                    lemma: tag.lemma.clone(),
                    pos: tag.pos,
                    dep: parsed.deps[local],
                    head: start + parsed.heads[local],
                    is_stop: STOP_WORDS.contains(words[local].as_str()),
                    is_alpha: !token.text.is_empty() && token.text.chars().all(char::is_alphabetic),
                    is_punct,
                    sentence: sentence_idx,
                    offset: token.start,
                });
            }

            let span_text =
                |from: usize, to: usize| text[raw[from].start..raw[to - 1].end].to_string();

            for chunk in &parsed.chunks {
                doc.noun_chunks.push(NounChunk {
                    start: start + chunk.start,
                    end: start + chunk.end,
                    root: start + chunk.root,
                    text: span_text(start + chunk.start, start + chunk.end),
                });
            }

            let surfaces: Vec<String> = slice.iter().map(|t| t.text.clone()).collect();
            for entity in find_entities(&surfaces, &pos) {
                doc.entities.push(EntitySpan {
                    text: span_text(start + entity.start, start + entity.end),
                    label: entity.label,
                    start: start + entity.start,
                    end: start + entity.end,
                    sentence: sentence_idx,
                });
            }

            doc.sentences.push(Sentence {
                start,
                end,
                text: span_text(start, end),
            });
        }

        tracing::trace!(
            tokens = doc.tokens.len(),
            sentences = doc.sentences.len(),
            entities = doc.entities.len(),
            "Document annotated"
        );

        Ok(doc)
    }

    fn name(&self) -> &str {
        "rule-based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DepLabel, EntityLabel};

    fn annotate(text: &str) -> AnnotatedDocument {
        RuleBasedAnnotator::new().annotate(text).unwrap()
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let annotator = RuleBasedAnnotator::new();
        assert!(matches!(annotator.annotate(""), Err(AnnotationError::Empty)));
        assert!(matches!(annotator.annotate("   \n "), Err(AnnotationError::Empty)));
    }

    #[test]
    fn test_sentences_and_offsets() {
        let text = "The sky is blue. Sunsets look red.";
        let doc = annotate(text);
        assert_eq!(doc.sentences.len(), 2);
        assert_eq!(doc.sentences[0].text, "The sky is blue.");
        assert_eq!(doc.sentences[1].text, "Sunsets look red.");
        for token in &doc.tokens {
            assert_eq!(&text[token.offset..token.offset + token.text.len()], token.text);
            assert_eq!(token.index, doc.tokens.iter().position(|t| t == token).unwrap());
        }
    }

    #[test]
    fn test_token_flags() {
        let doc = annotate("The weather was wonderful!");
        let the = &doc.tokens[0];
        assert!(the.is_stop);
        assert!(the.is_alpha);
        let wonderful = &doc.tokens[3];
        assert!(!wonderful.is_stop);
        assert!(wonderful.is_content());
        let bang = &doc.tokens[4];
        assert!(bang.is_punct);
        assert!(!bang.is_alpha);
        assert_eq!(bang.dep, DepLabel::Punct);
    }

    #[test]
    fn test_every_sentence_has_one_root() {
        let doc = annotate("Researchers collected the data in Paris. It was analyzed later. Great!");
        for sentence in &doc.sentences {
            let roots: Vec<_> = doc
                .sentence_tokens(sentence)
                .iter()
                .filter(|t| t.dep == DepLabel::Root)
                .collect();
            assert_eq!(roots.len(), 1);
            assert_eq!(roots[0].head, roots[0].index);
            for token in doc.sentence_tokens(sentence) {
                assert!(token.head >= sentence.start && token.head < sentence.end);
            }
        }
    }

    #[test]
    fn test_chunks_and_entities() {
        let doc = annotate("Scientists at Stanford University measured the bright sky in 2021.");
        let chunks: Vec<&str> = doc.noun_chunks.iter().map(|c| c.text.as_str()).collect();
        assert!(chunks.contains(&"the bright sky"));
        assert!(doc
            .entities
            .iter()
            .any(|e| e.text == "Stanford University" && e.label == EntityLabel::Org));
        assert!(doc
            .entities
            .iter()
            .any(|e| e.text == "2021" && e.label == EntityLabel::Date));
    }

    #[test]
    fn test_adverb_ends_noun_chunk() {
        let doc = annotate("Managers read the new report twice. Nobody liked the new report.");
        let chunks: Vec<&str> = doc.noun_chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(chunks.iter().filter(|c| **c == "the new report").count(), 2, "{chunks:?}");
        assert!(!chunks.iter().any(|c| c.contains("twice")));
    }
}

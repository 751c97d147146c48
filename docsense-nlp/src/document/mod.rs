//! Annotated documents.
//!
//! Everything downstream of the text preprocessor consumes an
//! [`AnnotatedDocument`]: tokens with lemma, part of speech, dependency label
//! and head, grouped into sentences, plus noun chunks and entity spans. The
//! [`DocumentAnnotator`] trait is the seam where a statistical parser can be
//! plugged in; [`RuleBasedAnnotator`] is the built-in implementation.

mod annotator;
mod lexicon;
mod ner;
mod parser;
mod tagger;
mod tokenize;

pub use annotator::RuleBasedAnnotator;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Tags
// ============================================================================

/// Universal part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Noun,
    Propn,
    Verb,
    Aux,
    Adj,
    Adv,
    Pron,
    Det,
    Adp,
    Cconj,
    Sconj,
    Num,
    Part,
    Intj,
    Punct,
    Sym,
    X,
}

impl PartOfSpeech {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "NOUN",
            Self::Propn => "PROPN",
            Self::Verb => "VERB",
            Self::Aux => "AUX",
            Self::Adj => "ADJ",
            Self::Adv => "ADV",
            Self::Pron => "PRON",
            Self::Det => "DET",
            Self::Adp => "ADP",
            Self::Cconj => "CCONJ",
            Self::Sconj => "SCONJ",
            Self::Num => "NUM",
            Self::Part => "PART",
            Self::Intj => "INTJ",
            Self::Punct => "PUNCT",
            Self::Sym => "SYM",
            Self::X => "X",
        }
    }

    /// Noun or proper noun.
    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Noun | Self::Propn)
    }
}

/// Dependency relation to the token's head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DepLabel {
    Root,
    Nsubj,
    Nsubjpass,
    Dobj,
    Pobj,
    Attr,
    Acomp,
    Aux,
    Auxpass,
    Neg,
    Det,
    Poss,
    Amod,
    Nummod,
    Compound,
    Advmod,
    Prep,
    Cc,
    Conj,
    Mark,
    Xcomp,
    Ccomp,
    Intj,
    Punct,
    Dep,
}

impl DepLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::Nsubj => "nsubj",
            Self::Nsubjpass => "nsubjpass",
            Self::Dobj => "dobj",
            Self::Pobj => "pobj",
            Self::Attr => "attr",
            Self::Acomp => "acomp",
            Self::Aux => "aux",
            Self::Auxpass => "auxpass",
            Self::Neg => "neg",
            Self::Det => "det",
            Self::Poss => "poss",
            Self::Amod => "amod",
            Self::Nummod => "nummod",
            Self::Compound => "compound",
            Self::Advmod => "advmod",
            Self::Prep => "prep",
            Self::Cc => "cc",
            Self::Conj => "conj",
            Self::Mark => "mark",
            Self::Xcomp => "xcomp",
            Self::Ccomp => "ccomp",
            Self::Intj => "intj",
            Self::Punct => "punct",
            Self::Dep => "dep",
        }
    }
}

/// Named entity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Loc,
    Norp,
    Date,
    Time,
    Money,
    Percent,
    Cardinal,
}

impl EntityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Org => "ORG",
            Self::Gpe => "GPE",
            Self::Loc => "LOC",
            Self::Norp => "NORP",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Money => "MONEY",
            Self::Percent => "PERCENT",
            Self::Cardinal => "CARDINAL",
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// A single token with its linguistic annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedToken {
    /// Position in the document token vector
    pub index: usize,
    /// Surface form
    pub text: String,
    /// Dictionary form
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub dep: DepLabel,
    /// Index of the syntactic head; the root points at itself
    pub head: usize,
    pub is_stop: bool,
    pub is_alpha: bool,
    pub is_punct: bool,
    /// Index of the containing sentence
    pub sentence: usize,
    /// Byte offset into the annotated text
    pub offset: usize,
}

impl AnnotatedToken {
    /// Lower-cased lemma.
    pub fn lemma_lower(&self) -> String {
        self.lemma.to_lowercase()
    }

    /// Non-stop, non-punctuation alphabetic token longer than two characters.
    pub fn is_content(&self) -> bool {
        !self.is_stop && !self.is_punct && self.is_alpha && self.text.chars().count() > 2
    }
}

/// A sentence as a half-open token range.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Sentence {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A base noun phrase as a half-open token range.
#[derive(Debug, Clone, PartialEq)]
pub struct NounChunk {
    pub start: usize,
    pub end: usize,
    /// Index of the head noun
    pub root: usize,
    pub text: String,
}

/// A named entity mention.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
    pub sentence: usize,
}

/// Output of one annotation pass. Immutable once produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotatedDocument {
    pub text: String,
    pub tokens: Vec<AnnotatedToken>,
    pub sentences: Vec<Sentence>,
    pub noun_chunks: Vec<NounChunk>,
    pub entities: Vec<EntitySpan>,
}

impl AnnotatedDocument {
    /// Tokens belonging to a sentence.
    pub fn sentence_tokens(&self, sentence: &Sentence) -> &[AnnotatedToken] {
        &self.tokens[sentence.start..sentence.end]
    }

    /// Tokens of a noun chunk.
    pub fn chunk_tokens(&self, chunk: &NounChunk) -> &[AnnotatedToken] {
        &self.tokens[chunk.start..chunk.end]
    }

    /// Syntactic children of a token.
    pub fn children(&self, head: usize) -> impl Iterator<Item = &AnnotatedToken> {
        self.tokens
            .iter()
            .filter(move |t| t.head == head && t.index != head)
    }

    /// Sentence texts in document order, skipping blank ones.
    pub fn sentence_texts(&self) -> Vec<&str> {
        self.sentences
            .iter()
            .map(|s| s.text.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Number of word tokens (alphabetic or numeric).
    pub fn word_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| !t.is_punct && t.text.chars().any(char::is_alphanumeric))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

// ============================================================================
// Annotator seam
// ============================================================================

/// Annotation failure.
#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("document contains no tokens")]
    Empty,

    #[error("annotation failed: {0}")]
    Failed(String),
}

/// Produces an [`AnnotatedDocument`] from plain text.
pub trait DocumentAnnotator: Send + Sync {
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument, AnnotationError>;

    /// Name reported in the availability section.
    fn name(&self) -> &str;
}

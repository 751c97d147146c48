//! Shallow dependency parsing.
//!
//! Noun chunks are found first with a determiner/modifier/noun pattern; the
//! main predicate becomes the root and chunks attach to it as subjects,
//! objects or attributes depending on their position. All indices here are
//! local to one sentence.

use super::lexicon::{BE_FORMS, COPULAS, IRREGULAR_LEMMAS, POSSESSIVES};
use super::{DepLabel, PartOfSpeech};

/// A noun chunk as a half-open range with its head noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChunkRange {
    pub start: usize,
    pub end: usize,
    pub root: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedSentence {
    pub heads: Vec<usize>,
    pub deps: Vec<DepLabel>,
    pub chunks: Vec<ChunkRange>,
}

struct Ctx<'a> {
    words: &'a [String],
    lemmas: &'a [String],
    pos: &'a [PartOfSpeech],
}

impl Ctx<'_> {
    fn len(&self) -> usize {
        self.pos.len()
    }

    fn is_possessive(&self, i: usize) -> bool {
        self.pos[i] == PartOfSpeech::Pron && POSSESSIVES.contains(self.words[i].as_str())
    }

    fn is_predicate(&self, i: usize) -> bool {
        matches!(self.pos[i], PartOfSpeech::Verb | PartOfSpeech::Aux)
    }

    fn is_participle(&self, i: usize) -> bool {
        let w = self.words[i].as_str();
        w.ends_with("ed") || w.ends_with("en") || IRREGULAR_LEMMAS.contains_key(w)
    }

    /// Verb governed by an auxiliary, looking past adverbs, negation and pronouns.
    fn governed_verb(&self, aux: usize) -> Option<usize> {
        (aux + 1..self.len())
            .take(4)
            .find(|&j| {
                !matches!(
                    self.pos[j],
                    PartOfSpeech::Adv | PartOfSpeech::Part | PartOfSpeech::Pron
                )
            })
            .filter(|&j| self.pos[j] == PartOfSpeech::Verb)
    }
}

/// Parse one sentence given lower-cased words, lemmas and tags.
pub(crate) fn parse_sentence(
    words: &[String],
    lemmas: &[String],
    pos: &[PartOfSpeech],
) -> ParsedSentence {
    let ctx = Ctx { words, lemmas, pos };
    let n = ctx.len();
    if n == 0 {
        return ParsedSentence {
            heads: Vec::new(),
            deps: Vec::new(),
            chunks: Vec::new(),
        };
    }

    let chunks = find_chunks(&ctx);
    let mut chunk_of: Vec<Option<usize>> = vec![None; n];
    for (c, chunk) in chunks.iter().enumerate() {
        for slot in &mut chunk_of[chunk.start..chunk.end] {
            *slot = Some(c);
        }
    }

    let root = find_root(&ctx, &chunks);
    let mut heads: Vec<usize> = vec![root; n];
    let mut deps: Vec<Option<DepLabel>> = vec![None; n];
    deps[root] = Some(DepLabel::Root);

    // Auxiliaries attach to the verb they govern
    let mut governor: Vec<usize> = (0..n).collect();
    for i in 0..n {
        if pos[i] != PartOfSpeech::Aux {
            continue;
        }
        if let Some(verb) = ctx.governed_verb(i) {
            governor[i] = verb;
            if i != root {
                let passive = BE_FORMS.contains(words[i].as_str()) && ctx.is_participle(verb);
                heads[i] = verb;
                deps[i] = Some(if passive { DepLabel::Auxpass } else { DepLabel::Aux });
            }
        }
    }

    // Remaining predicates
    for i in 0..n {
        if i == root || deps[i].is_some() || !ctx.is_predicate(i) {
            continue;
        }
        let prev = (0..i).rev().find(|&p| pos[p] != PartOfSpeech::Adv);
        let prev_predicate = (0..i).rev().find(|&p| ctx.is_predicate(p)).unwrap_or(0);
        let coordinated = (prev_predicate..i).any(|p| pos[p] == PartOfSpeech::Cconj);
        let label = match prev {
            Some(p) if pos[p] == PartOfSpeech::Part && words[p] == "to" => DepLabel::Xcomp,
            _ if coordinated => DepLabel::Conj,
            _ => DepLabel::Ccomp,
        };
        let head = if label == DepLabel::Xcomp {
            (0..i)
                .rev()
                .find(|&p| ctx.is_predicate(p) && governor[p] == p)
                .unwrap_or(root)
        } else {
            root
        };
        heads[i] = head;
        deps[i] = Some(label);
    }

    // Chunk internals and chunk roles
    for (c, chunk) in chunks.iter().enumerate() {
        for k in chunk.start..chunk.end {
            if k == chunk.root {
                continue;
            }
            let (label, head) = match pos[k] {
                PartOfSpeech::Det => (DepLabel::Det, chunk.root),
                PartOfSpeech::Pron if ctx.is_possessive(k) => (DepLabel::Poss, chunk.root),
                PartOfSpeech::Adj => (DepLabel::Amod, chunk.root),
                PartOfSpeech::Num => (DepLabel::Nummod, chunk.root),
                PartOfSpeech::Adv => (DepLabel::Advmod, k + 1),
                PartOfSpeech::Part => (DepLabel::Dep, k.saturating_sub(1)),
                PartOfSpeech::Noun | PartOfSpeech::Propn
                    if words.get(k + 1).is_some_and(|w| w == "'s") =>
                {
                    (DepLabel::Poss, chunk.root)
                }
                _ => (DepLabel::Compound, chunk.root),
            };
            heads[k] = head;
            deps[k] = Some(label);
        }

        let r = chunk.root;
        if r == root {
            continue;
        }
        let (label, head) = chunk_role(&ctx, &chunks, c, &governor, root);
        heads[r] = head;
        deps[r] = Some(label);
    }

    // Everything else
    for i in 0..n {
        if deps[i].is_some() {
            continue;
        }
        let (label, head) = match pos[i] {
            PartOfSpeech::Punct | PartOfSpeech::Sym | PartOfSpeech::X => (DepLabel::Punct, root),
            PartOfSpeech::Part if matches!(words[i].as_str(), "not" | "n't") => {
                (DepLabel::Neg, nearest_predicate(&ctx, i, &governor).unwrap_or(root))
            }
            PartOfSpeech::Part if words[i] == "to" => {
                (DepLabel::Aux, next_verb(&ctx, i).unwrap_or(root))
            }
            PartOfSpeech::Adv if words[i] == "never" => {
                (DepLabel::Neg, nearest_predicate(&ctx, i, &governor).unwrap_or(root))
            }
            PartOfSpeech::Adv => {
                let head = match pos.get(i + 1) {
                    Some(PartOfSpeech::Adj | PartOfSpeech::Adv) => i + 1,
                    _ => nearest_predicate(&ctx, i, &governor).unwrap_or(root),
                };
                (DepLabel::Advmod, head)
            }
            PartOfSpeech::Adp => {
                let head = (0..i)
                    .rev()
                    .find(|&p| {
                        pos[p].is_nominal()
                            || matches!(
                                pos[p],
                                PartOfSpeech::Verb | PartOfSpeech::Pron | PartOfSpeech::Adj
                            )
                            || (pos[p] == PartOfSpeech::Aux && governor[p] == p)
                    })
                    .unwrap_or(root);
                (DepLabel::Prep, head)
            }
            PartOfSpeech::Adj => {
                let copula = (0..i).rev().find(|&p| ctx.is_predicate(p));
                match copula {
                    Some(p) if is_copula(&ctx, p, &governor) => (DepLabel::Acomp, governor[p]),
                    _ => {
                        let noun = (i + 1..n).find(|&j| pos[j].is_nominal());
                        (DepLabel::Amod, noun.unwrap_or(root))
                    }
                }
            }
            PartOfSpeech::Cconj => {
                let head = (0..i)
                    .rev()
                    .find(|&p| pos[p] != PartOfSpeech::Punct)
                    .unwrap_or(root);
                (DepLabel::Cc, head)
            }
            PartOfSpeech::Sconj => (DepLabel::Mark, next_predicate(&ctx, i).unwrap_or(root)),
            PartOfSpeech::Intj => (DepLabel::Intj, root),
            _ => (DepLabel::Dep, root),
        };
        heads[i] = if head == i { root } else { head };
        deps[i] = Some(label);
    }

    heads[root] = root;
    ParsedSentence {
        heads,
        deps: deps
            .into_iter()
            .map(|d| d.unwrap_or(DepLabel::Dep))
            .collect(),
        chunks,
    }
}

/// Base noun phrases: an optional determiner or possessive, modifiers, then nouns.
fn find_chunks(ctx: &Ctx<'_>) -> Vec<ChunkRange> {
    let n = ctx.len();
    let mut chunks = Vec::new();
    let mut i = 0;

    while i < n {
        let pos = ctx.pos[i];
        if pos == PartOfSpeech::Pron && !ctx.is_possessive(i) {
            chunks.push(ChunkRange {
                start: i,
                end: i + 1,
                root: i,
            });
            i += 1;
            continue;
        }

        let start = i;
        let mut j = i;
        if pos == PartOfSpeech::Det || ctx.is_possessive(j) {
            j += 1;
        }
        let mut last_nominal = None;
        while j < n {
            let p = ctx.pos[j];
            let modifier = matches!(p, PartOfSpeech::Adj | PartOfSpeech::Num)
                || (p == PartOfSpeech::Adv
                    && ctx.pos.get(j + 1) == Some(&PartOfSpeech::Adj));
            let possessive_marker = p == PartOfSpeech::Part
                && ctx.words[j] == "'s"
                && j > start
                && ctx.pos[j - 1].is_nominal();
            if p.is_nominal() {
                last_nominal = Some(j);
            } else if !modifier && !possessive_marker {
                break;
            }
            j += 1;
        }

        match last_nominal {
            Some(root) => {
                chunks.push(ChunkRange {
                    start,
                    end: root + 1,
                    root,
                });
                i = root + 1;
            }
            None => i = start + 1,
        }
    }
    chunks
}

fn find_root(ctx: &Ctx<'_>, chunks: &[ChunkRange]) -> usize {
    let n = ctx.len();
    let pos = ctx.pos;

    // Verbs inside a clause opened by a subordinator are skipped when possible
    let mut subordinate = vec![false; n];
    let mut open = false;
    for i in 0..n {
        if pos[i] == PartOfSpeech::Sconj
            || (i == 0 && matches!(ctx.words[0].as_str(), "when" | "where" | "while"))
        {
            open = true;
        } else if ctx.words[i] == "," {
            open = false;
        }
        subordinate[i] = open;
    }

    let after_to = |i: usize| {
        (0..i)
            .rev()
            .find(|&p| pos[p] != PartOfSpeech::Adv)
            .is_some_and(|p| pos[p] == PartOfSpeech::Part && ctx.words[p] == "to")
    };
    let verb = |allow_subordinate: bool| {
        (0..n).find(|&i| {
            (allow_subordinate || !subordinate[i])
                && ((pos[i] == PartOfSpeech::Verb && !after_to(i))
                    || (pos[i] == PartOfSpeech::Aux && ctx.governed_verb(i).is_none()))
        })
    };

    verb(false)
        .or_else(|| verb(true))
        .or_else(|| (0..n).find(|&i| pos[i] == PartOfSpeech::Aux))
        .or_else(|| chunks.first().map(|c| c.root))
        .or_else(|| (0..n).find(|&i| pos[i] != PartOfSpeech::Punct))
        .unwrap_or(0)
}

fn chunk_role(
    ctx: &Ctx<'_>,
    chunks: &[ChunkRange],
    c: usize,
    governor: &[usize],
    root: usize,
) -> (DepLabel, usize) {
    let chunk = chunks[c];
    let pos = ctx.pos;

    let prev = chunk.start.checked_sub(1);
    if let Some(prev) = prev.filter(|&p| pos[p] == PartOfSpeech::Adp) {
        return (DepLabel::Pobj, prev);
    }

    // Subject: a predicate follows with only adverbs or negation between
    let follower = (chunk.end..ctx.len()).find(|&j| {
        !matches!(pos[j], PartOfSpeech::Adv | PartOfSpeech::Part)
    });
    if let Some(p) = follower.filter(|&p| ctx.is_predicate(p)) {
        let verb = governor[p];
        let passive = (p..=verb).any(|k| {
            pos[k] == PartOfSpeech::Aux
                && governor[k] == verb
                && k != verb
                && BE_FORMS.contains(ctx.words[k].as_str())
                && ctx.is_participle(verb)
        });
        let label = if passive {
            DepLabel::Nsubjpass
        } else {
            DepLabel::Nsubj
        };
        return (label, verb);
    }

    if prev.is_some_and(|p| pos[p] == PartOfSpeech::Cconj) && c > 0 {
        let earlier = chunks[c - 1];
        if earlier.end + 1 == chunk.start {
            return (DepLabel::Conj, earlier.root);
        }
    }

    // Object or attribute: directly after a predicate
    let leader = (0..chunk.start)
        .rev()
        .find(|&j| !matches!(pos[j], PartOfSpeech::Adv | PartOfSpeech::Part));
    if let Some(p) = leader.filter(|&p| ctx.is_predicate(p)) {
        let label = if is_copula(ctx, p, governor) {
            DepLabel::Attr
        } else {
            DepLabel::Dobj
        };
        return (label, governor[p]);
    }

    (DepLabel::Dep, root)
}

fn is_copula(ctx: &Ctx<'_>, p: usize, governor: &[usize]) -> bool {
    let verb = governor[p];
    (ctx.pos[verb] == PartOfSpeech::Aux && ctx.governed_verb(verb).is_none())
        || COPULAS.contains(ctx.lemmas[verb].as_str())
}

fn nearest_predicate(ctx: &Ctx<'_>, i: usize, governor: &[usize]) -> Option<usize> {
    let after = (i + 1..ctx.len()).find(|&j| ctx.is_predicate(j));
    let before = (0..i).rev().find(|&j| ctx.is_predicate(j));
    let pick = match (before, after) {
        (Some(b), Some(a)) => {
            if a - i <= i - b {
                a
            } else {
                b
            }
        }
        (b, a) => a.or(b)?,
    };
    Some(governor[pick])
}

fn next_verb(ctx: &Ctx<'_>, i: usize) -> Option<usize> {
    (i + 1..ctx.len()).find(|&j| ctx.pos[j] == PartOfSpeech::Verb)
}

fn next_predicate(ctx: &Ctx<'_>, i: usize) -> Option<usize> {
    (i + 1..ctx.len()).find(|&j| ctx.is_predicate(j))
}

#[cfg(test)]
mod tests {
    use super::*;
    use PartOfSpeech::*;

    fn parse(tagged: &[(&str, &str, PartOfSpeech)]) -> ParsedSentence {
        let words: Vec<String> = tagged.iter().map(|(w, _, _)| w.to_string()).collect();
        let lemmas: Vec<String> = tagged.iter().map(|(_, l, _)| l.to_string()).collect();
        let pos: Vec<PartOfSpeech> = tagged.iter().map(|(_, _, p)| *p).collect();
        parse_sentence(&words, &lemmas, &pos)
    }

    #[test]
    fn test_subject_verb_object() {
        // the researchers predict the weather .
        let parsed = parse(&[
            ("the", "the", Det),
            ("researchers", "researcher", Noun),
            ("predict", "predict", Verb),
            ("the", "the", Det),
            ("weather", "weather", Noun),
            (".", ".", Punct),
        ]);
        assert_eq!(parsed.deps[2], DepLabel::Root);
        assert_eq!(parsed.heads[2], 2);
        assert_eq!(parsed.deps[1], DepLabel::Nsubj);
        assert_eq!(parsed.heads[1], 2);
        assert_eq!(parsed.deps[4], DepLabel::Dobj);
        assert_eq!(parsed.heads[4], 2);
        assert_eq!(parsed.deps[0], DepLabel::Det);
        assert_eq!(parsed.deps[5], DepLabel::Punct);
        assert_eq!(
            parsed.chunks,
            vec![
                ChunkRange { start: 0, end: 2, root: 1 },
                ChunkRange { start: 3, end: 5, root: 4 },
            ]
        );
    }

    #[test]
    fn test_copula_with_attribute_and_acomp() {
        // it is a blue sky and it is bright
        let parsed = parse(&[
            ("it", "it", Pron),
            ("is", "be", Aux),
            ("a", "a", Det),
            ("blue", "blue", Adj),
            ("sky", "sky", Noun),
            ("and", "and", Cconj),
            ("it", "it", Pron),
            ("is", "be", Aux),
            ("bright", "bright", Adj),
        ]);
        assert_eq!(parsed.deps[1], DepLabel::Root);
        assert_eq!(parsed.deps[4], DepLabel::Attr);
        assert_eq!(parsed.deps[3], DepLabel::Amod);
        assert_eq!(parsed.deps[8], DepLabel::Acomp);
        assert_eq!(parsed.deps[7], DepLabel::Conj);
    }

    #[test]
    fn test_passive_and_prepositional_object() {
        // the data was collected by researchers
        let parsed = parse(&[
            ("the", "the", Det),
            ("data", "data", Noun),
            ("was", "be", Aux),
            ("collected", "collect", Verb),
            ("by", "by", Adp),
            ("researchers", "researcher", Noun),
        ]);
        assert_eq!(parsed.deps[3], DepLabel::Root);
        assert_eq!(parsed.deps[2], DepLabel::Auxpass);
        assert_eq!(parsed.heads[2], 3);
        assert_eq!(parsed.deps[1], DepLabel::Nsubjpass);
        assert_eq!(parsed.deps[4], DepLabel::Prep);
        assert_eq!(parsed.heads[4], 3);
        assert_eq!(parsed.deps[5], DepLabel::Pobj);
        assert_eq!(parsed.heads[5], 4);
    }

    #[test]
    fn test_heading_without_verb_roots_on_noun() {
        let parsed = parse(&[
            ("blue", "blue", Adj),
            ("skies", "sky", Noun),
        ]);
        assert_eq!(parsed.deps[1], DepLabel::Root);
        assert_eq!(parsed.heads[1], 1);
        assert_eq!(parsed.deps[0], DepLabel::Amod);
    }

    #[test]
    fn test_empty_sentence() {
        let parsed = parse_sentence(&[], &[], &[]);
        assert!(parsed.heads.is_empty());
        assert!(parsed.chunks.is_empty());
    }
}

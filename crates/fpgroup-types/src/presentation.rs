// ─────────────────────────────────────────────────────────────────────
// FPGroup Bridge — Source Presentation Data Model
// ─────────────────────────────────────────────────────────────────────
//! Finitely presented groups as the topology engine hands them over:
//! a generator count plus relator words of signed generator powers.
//!
//! These types store words exactly as given. Nothing here reduces,
//! cancels, or reorders terms.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};

/// A single term `g^e` of a group word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupExpressionTerm {
    /// Generator index, in `[0, n)` for a presentation of rank `n`.
    pub generator: usize,
    /// Signed exponent. Nonzero in a well-formed presentation.
    pub exponent: i64,
}

impl GroupExpressionTerm {
    pub fn new(generator: usize, exponent: i64) -> Self {
        Self {
            generator,
            exponent,
        }
    }

    /// The term `g^-e`.
    pub fn inverse(&self) -> Self {
        Self::new(self.generator, -self.exponent)
    }
}

impl From<(usize, i64)> for GroupExpressionTerm {
    fn from((generator, exponent): (usize, i64)) -> Self {
        Self::new(generator, exponent)
    }
}

impl fmt::Display for GroupExpressionTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exponent == 1 {
            write!(f, "g{}", self.generator)
        } else {
            write!(f, "g{}^{}", self.generator, self.exponent)
        }
    }
}

/// An ordered word in the generators of a presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupExpression {
    terms: Vec<GroupExpressionTerm>,
}

impl GroupExpression {
    /// The empty word.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_terms<I, T>(terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<GroupExpressionTerm>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    pub fn terms(&self) -> &[GroupExpressionTerm] {
        &self.terms
    }

    pub fn add_term_last(&mut self, term: GroupExpressionTerm) {
        self.terms.push(term);
    }

    pub fn add_term_first(&mut self, term: GroupExpressionTerm) {
        self.terms.insert(0, term);
    }

    pub fn count_terms(&self) -> usize {
        self.terms.len()
    }

    /// Total number of letters, i.e. the sum of `|e|` over all terms.
    pub fn word_length(&self) -> u64 {
        self.terms.iter().map(|t| t.exponent.unsigned_abs()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The inverse word: terms reversed, each exponent negated.
    pub fn inverse(&self) -> Self {
        Self {
            terms: self.terms.iter().rev().map(|t| t.inverse()).collect(),
        }
    }

    /// `n` copies of this word written one after another.
    /// Negative `n` repeats the inverse; zero gives the empty word.
    pub fn power(&self, n: i64) -> Self {
        let base = if n < 0 { self.inverse() } else { self.clone() };
        let copies = n.unsigned_abs() as usize;
        let mut terms = Vec::with_capacity(base.terms.len() * copies);
        for _ in 0..copies {
            terms.extend_from_slice(&base.terms);
        }
        Self { terms }
    }
}

impl fmt::Display for GroupExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("1");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

/// Read access to a finitely presented group.
///
/// This is all the converter needs from a presentation engine.
/// Implementors guarantee that `relation(i)` is valid for every
/// `i < relation_count()`.
pub trait PresentationSource {
    fn generator_count(&self) -> usize;

    fn relation_count(&self) -> usize;

    /// Terms of relator `index`, in order.
    fn relation(&self, index: usize) -> &[GroupExpressionTerm];
}

/// Check every relator term of `source` against its generator count.
///
/// Reports the first out-of-range generator or zero exponent.
pub fn validate_source<P>(source: &P) -> BridgeResult<()>
where
    P: PresentationSource + ?Sized,
{
    let rank = source.generator_count();
    for relation in 0..source.relation_count() {
        for (term, t) in source.relation(relation).iter().enumerate() {
            if t.generator >= rank {
                return Err(BridgeError::GeneratorOutOfRange {
                    relation,
                    term,
                    generator: t.generator,
                    rank,
                });
            }
            if t.exponent == 0 {
                return Err(BridgeError::ZeroExponent { relation, term });
            }
        }
    }
    Ok(())
}

/// A finitely presented group stored as generators plus relators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPresentation {
    generators: usize,
    relations: Vec<GroupExpression>,
}

impl GroupPresentation {
    /// A presentation with `generators` generators and no relators.
    pub fn new(generators: usize) -> Self {
        Self {
            generators,
            relations: Vec::new(),
        }
    }

    /// Append `count` new generators and return the index of the first.
    pub fn add_generator(&mut self, count: usize) -> usize {
        let first = self.generators;
        self.generators += count;
        first
    }

    pub fn add_relation(&mut self, relation: GroupExpression) {
        self.relations.push(relation);
    }

    pub fn count_generators(&self) -> usize {
        self.generators
    }

    pub fn count_relations(&self) -> usize {
        self.relations.len()
    }

    /// Relator `index`, or `None` when out of range.
    pub fn relation(&self, index: usize) -> Option<&GroupExpression> {
        self.relations.get(index)
    }

    pub fn relations(&self) -> &[GroupExpression] {
        &self.relations
    }

    /// Check that every term names an existing generator with a
    /// nonzero exponent. Reports the first offending term.
    pub fn validate(&self) -> BridgeResult<()> {
        validate_source(self)
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> BridgeResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| BridgeError::Serialization(format!("JSON parse error: {e}")))
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> BridgeResult<String> {
        serde_json::to_string(self).map_err(|e| BridgeError::Serialization(e.to_string()))
    }
}

impl PresentationSource for GroupPresentation {
    fn generator_count(&self) -> usize {
        self.generators
    }

    fn relation_count(&self) -> usize {
        self.relations.len()
    }

    fn relation(&self, index: usize) -> &[GroupExpressionTerm] {
        self.relations[index].terms()
    }
}

impl fmt::Display for GroupPresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<")?;
        for g in 0..self.generators {
            if g > 0 {
                f.write_str(", ")?;
            }
            write!(f, "g{g}")?;
        }
        f.write_str(" | ")?;
        for (i, relation) in self.relations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{relation}")?;
        }
        f.write_str(">")
    }
}

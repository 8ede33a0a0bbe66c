// ─────────────────────────────────────────────────────────────────────
// FPGroup Bridge — Native Free Group
// ─────────────────────────────────────────────────────────────────────
//! Free groups of finite rank with labeled generators.
//!
//! Elements are freely reduced words stored as syllables `(g, e)`:
//! adjacent syllables never share a generator and no exponent is zero.
//! Multiplication concatenates and cancels at the seam only, so the
//! cost is linear in the shorter cancelled prefix plus the appended
//! tail.
//!
//! Exponents are `i64`. Every operation has a `try_` form that reports
//! exponent overflow or an oversized result as a `WordError`; the
//! operator forms panic on those instead.

use std::fmt;
use std::ops::Mul;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fpgroup_types::BridgeError;

/// Largest number of syllables a power may produce.
pub const MAX_WORD_SYLLABLES: usize = 1 << 24;

/// Largest number of letters a Tietze list may hold.
pub const MAX_TIETZE_LETTERS: usize = 1 << 24;

/// Failure of a free-group word operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    /// A combined exponent left the `i64` range.
    #[error("exponent overflow in generator {generator}")]
    ExponentOverflow { generator: usize },

    /// The result would exceed the size bound.
    #[error("word too long: {size} exceeds the limit of {limit}")]
    TooLong { size: u128, limit: usize },
}

impl From<WordError> for BridgeError {
    fn from(e: WordError) -> Self {
        BridgeError::Host(e.to_string())
    }
}

/// A free group on `rank` labeled generators.
///
/// Cloning is cheap: labels are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeGroup {
    names: Arc<[String]>,
}

impl FreeGroup {
    /// Free group of the given rank with generators `x0, x1, ...`.
    pub fn new(rank: usize) -> Self {
        Self::with_prefix(rank, "x")
    }

    /// Free group of the given rank with generators `<prefix>0, <prefix>1, ...`.
    pub fn with_prefix(rank: usize, prefix: &str) -> Self {
        Self::from_names((0..rank).map(|i| format!("{prefix}{i}")).collect())
    }

    /// Free group whose generators carry the given labels, in order.
    pub fn from_names(names: Vec<String>) -> Self {
        Self {
            names: names.into(),
        }
    }

    pub fn rank(&self) -> usize {
        self.names.len()
    }

    pub fn generator_names(&self) -> &[String] {
        &self.names
    }

    /// All generators, in index order.
    pub fn generators(&self) -> Vec<FreeGroupElement> {
        (0..self.rank()).map(|i| self.letter(i, 1)).collect()
    }

    /// Generator `index`, or `None` when out of range.
    pub fn generator(&self, index: usize) -> Option<FreeGroupElement> {
        (index < self.rank()).then(|| self.letter(index, 1))
    }

    pub fn identity(&self) -> FreeGroupElement {
        FreeGroupElement {
            names: Arc::clone(&self.names),
            syllables: Vec::new(),
        }
    }

    /// Build an element from a Tietze list: `i > 0` stands for generator
    /// `i - 1`, `-i` for its inverse. Returns `None` for `0` or an index
    /// beyond the rank.
    pub fn element_from_tietze(&self, letters: &[i64]) -> Option<FreeGroupElement> {
        let mut element = self.identity();
        for &letter in letters {
            let index = usize::try_from(letter.unsigned_abs()).ok()?.checked_sub(1)?;
            if index >= self.rank() {
                return None;
            }
            element.push_syllable(index, letter.signum()).ok()?;
        }
        Some(element)
    }

    /// Build an element from syllables, reducing as they are appended.
    /// Returns `None` for an index beyond the rank or on overflow.
    pub fn element_from_syllables(&self, syllables: &[Syllable]) -> Option<FreeGroupElement> {
        if syllables.iter().any(|s| s.generator >= self.rank()) {
            return None;
        }
        let mut element = self.identity();
        element.append(syllables).ok()?;
        Some(element)
    }

    /// True if `element` was created by this group (or a clone of it).
    pub fn contains(&self, element: &FreeGroupElement) -> bool {
        Arc::ptr_eq(&self.names, &element.names)
    }

    fn letter(&self, index: usize, exponent: i64) -> FreeGroupElement {
        FreeGroupElement {
            names: Arc::clone(&self.names),
            syllables: vec![Syllable {
                generator: index,
                exponent,
            }],
        }
    }
}

/// One maximal run `g^e` inside a reduced word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Syllable {
    pub generator: usize,
    pub exponent: i64,
}

impl Syllable {
    fn try_inverse(self) -> Result<Self, WordError> {
        let exponent = self
            .exponent
            .checked_neg()
            .ok_or(WordError::ExponentOverflow {
                generator: self.generator,
            })?;
        Ok(Self {
            generator: self.generator,
            exponent,
        })
    }
}

/// A freely reduced word in a `FreeGroup`.
///
/// Equality compares generator labels and the reduced word, so two
/// elements built separately from equal groups compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeGroupElement {
    names: Arc<[String]>,
    syllables: Vec<Syllable>,
}

impl FreeGroupElement {
    pub fn syllables(&self) -> &[Syllable] {
        &self.syllables
    }

    pub fn is_identity(&self) -> bool {
        self.syllables.is_empty()
    }

    /// Number of letters in the reduced word.
    pub fn length(&self) -> u128 {
        self.syllables
            .iter()
            .map(|s| u128::from(s.exponent.unsigned_abs()))
            .sum()
    }

    /// Rank of the free group this element lives in.
    pub fn rank(&self) -> usize {
        self.names.len()
    }

    /// # Panics
    ///
    /// Panics if a syllable has exponent `i64::MIN`; see [`Self::try_inverse`].
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_inverse(&self) -> Result<Self, WordError> {
        Ok(Self {
            names: Arc::clone(&self.names),
            syllables: invert(&self.syllables)?,
        })
    }

    /// Integer power. Negative exponents raise the inverse.
    ///
    /// # Panics
    ///
    /// Panics on overflow or an oversized result; see [`Self::try_pow`].
    pub fn pow(&self, exponent: i64) -> Self {
        self.try_pow(exponent).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Integer power, written as `u * c^n * u^-1` with `c` cyclically
    /// reduced. A single-syllable core only scales its exponent; a
    /// longer core is repeated, bounded by `MAX_WORD_SYLLABLES`.
    pub fn try_pow(&self, exponent: i64) -> Result<Self, WordError> {
        let mut out = Self {
            names: Arc::clone(&self.names),
            syllables: Vec::new(),
        };
        if exponent == 0 || self.is_identity() {
            return Ok(out);
        }

        let (conjugator, core) = cyclic_decomposition(&self.syllables)?;
        out.append(&conjugator)?;
        if let [single] = core.as_slice() {
            let scaled = single
                .exponent
                .checked_mul(exponent)
                .ok_or(WordError::ExponentOverflow {
                    generator: single.generator,
                })?;
            out.push_syllable(single.generator, scaled)?;
        } else {
            let copies = exponent.unsigned_abs();
            let size = u128::from(copies) * core.len() as u128;
            if size > MAX_WORD_SYLLABLES as u128 {
                return Err(WordError::TooLong {
                    size,
                    limit: MAX_WORD_SYLLABLES,
                });
            }
            let core = if exponent < 0 { invert(&core)? } else { core };
            for _ in 0..copies {
                out.append(&core)?;
            }
        }
        out.append(&invert(&conjugator)?)?;
        Ok(out)
    }

    /// Concatenate and freely reduce, reporting exponent overflow.
    pub fn try_mul(&self, rhs: &FreeGroupElement) -> Result<Self, WordError> {
        let mut out = self.clone();
        out.syllables.reserve(rhs.syllables.len());
        out.append(&rhs.syllables)?;
        Ok(out)
    }

    /// Tietze list of the reduced word: generator `g` is `g + 1`, its
    /// inverse `-(g + 1)`, one entry per letter. Fails when the word
    /// has more than `MAX_TIETZE_LETTERS` letters.
    pub fn tietze(&self) -> Result<Vec<i64>, WordError> {
        let size = self.length();
        if size > MAX_TIETZE_LETTERS as u128 {
            return Err(WordError::TooLong {
                size,
                limit: MAX_TIETZE_LETTERS,
            });
        }
        let mut letters = Vec::with_capacity(size as usize);
        for s in &self.syllables {
            let letter = i64::try_from(s.generator)
                .ok()
                .and_then(|g| g.checked_add(1))
                .ok_or(WordError::ExponentOverflow {
                    generator: s.generator,
                })?
                * s.exponent.signum();
            for _ in 0..s.exponent.unsigned_abs() {
                letters.push(letter);
            }
        }
        Ok(letters)
    }

    fn append(&mut self, syllables: &[Syllable]) -> Result<(), WordError> {
        for s in syllables {
            self.push_syllable(s.generator, s.exponent)?;
        }
        Ok(())
    }

    fn push_syllable(&mut self, generator: usize, exponent: i64) -> Result<(), WordError> {
        if exponent == 0 {
            return Ok(());
        }
        match self.syllables.last_mut() {
            Some(last) if last.generator == generator => {
                last.exponent = last
                    .exponent
                    .checked_add(exponent)
                    .ok_or(WordError::ExponentOverflow { generator })?;
                if last.exponent == 0 {
                    self.syllables.pop();
                }
            }
            _ => self.syllables.push(Syllable {
                generator,
                exponent,
            }),
        }
        Ok(())
    }
}

fn invert(syllables: &[Syllable]) -> Result<Vec<Syllable>, WordError> {
    syllables.iter().rev().map(|s| s.try_inverse()).collect()
}

/// Split a nonempty reduced word `w` into `(u, c)` with `w = u c u^-1`
/// and `c` cyclically reduced.
fn cyclic_decomposition(
    syllables: &[Syllable],
) -> Result<(Vec<Syllable>, Vec<Syllable>), WordError> {
    let (mut i, mut j) = (0, syllables.len() - 1);
    while i < j
        && syllables[i].generator == syllables[j].generator
        && syllables[i].exponent.checked_neg() == Some(syllables[j].exponent)
    {
        i += 1;
        j -= 1;
    }

    let mut conjugator = syllables[..i].to_vec();
    if i < j && syllables[i].generator == syllables[j].generator {
        // g^a M g^b = g^-b (g^(a+b) M) g^b
        let (first, last) = (syllables[i], syllables[j]);
        let merged = first
            .exponent
            .checked_add(last.exponent)
            .ok_or(WordError::ExponentOverflow {
                generator: first.generator,
            })?;
        conjugator.push(last.try_inverse()?);
        let mut core = Vec::with_capacity(j - i);
        core.push(Syllable {
            generator: first.generator,
            exponent: merged,
        });
        core.extend_from_slice(&syllables[i + 1..j]);
        return Ok((conjugator, core));
    }
    Ok((conjugator, syllables[i..=j].to_vec()))
}

impl Mul for &FreeGroupElement {
    type Output = FreeGroupElement;

    /// Concatenate and freely reduce. Both operands should come from
    /// the same group; the result keeps the left operand's labels.
    ///
    /// Panics on exponent overflow; see `FreeGroupElement::try_mul`.
    fn mul(self, rhs: &FreeGroupElement) -> FreeGroupElement {
        self.try_mul(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl Mul for FreeGroupElement {
    type Output = FreeGroupElement;

    fn mul(self, rhs: FreeGroupElement) -> FreeGroupElement {
        &self * &rhs
    }
}

impl fmt::Display for FreeGroupElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.syllables.is_empty() {
            return f.write_str("1");
        }
        for (i, s) in self.syllables.iter().enumerate() {
            if i > 0 {
                f.write_str("*")?;
            }
            let name = &self.names[s.generator];
            if s.exponent == 1 {
                f.write_str(name)?;
            } else {
                write!(f, "{name}^{}", s.exponent)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for FreeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Free Group on generators {{{}}}", self.names.join(", "))
    }
}

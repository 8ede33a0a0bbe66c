// ─────────────────────────────────────────────────────────────────────
// FPGroup Bridge — Native Finitely Presented Group
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::{Deserialize, Serialize};

use fpgroup_types::{BridgeError, BridgeResult};

use crate::free_group::{FreeGroup, FreeGroupElement, Syllable, WordError};

/// JSON shape of a `FinitelyPresentedGroup`: labels plus reduced
/// relator syllables.
#[derive(Serialize, Deserialize)]
struct PresentationRecord {
    generators: Vec<String>,
    relations: Vec<Vec<Syllable>>,
}

/// A free group quotiented by an ordered list of relator words.
///
/// Relators are kept exactly as supplied: trivial relators and
/// duplicates stay in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinitelyPresentedGroup {
    free_group: FreeGroup,
    relations: Vec<FreeGroupElement>,
}

impl FinitelyPresentedGroup {
    pub fn new(free_group: FreeGroup, relations: Vec<FreeGroupElement>) -> Self {
        Self {
            free_group,
            relations,
        }
    }

    /// Number of generators.
    pub fn ngens(&self) -> usize {
        self.free_group.rank()
    }

    /// The ambient free group.
    pub fn free_group(&self) -> &FreeGroup {
        &self.free_group
    }

    pub fn relations(&self) -> &[FreeGroupElement] {
        &self.relations
    }

    /// Generators of the ambient free group, standing in for their
    /// images in the quotient.
    pub fn gens(&self) -> Vec<FreeGroupElement> {
        self.free_group.generators()
    }

    /// Relators as Tietze lists.
    pub fn tietze_relations(&self) -> Result<Vec<Vec<i64>>, WordError> {
        self.relations.iter().map(FreeGroupElement::tietze).collect()
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> BridgeResult<String> {
        let record = PresentationRecord {
            generators: self.free_group.generator_names().to_vec(),
            relations: self
                .relations
                .iter()
                .map(|r| r.syllables().to_vec())
                .collect(),
        };
        serde_json::to_string(&record).map_err(|e| BridgeError::Serialization(e.to_string()))
    }

    /// Load from JSON string. Relators are reduced on the way in.
    pub fn from_json(json: &str) -> BridgeResult<Self> {
        let record: PresentationRecord = serde_json::from_str(json)
            .map_err(|e| BridgeError::Serialization(format!("JSON parse error: {e}")))?;
        let free_group = FreeGroup::from_names(record.generators);
        let relations = record
            .relations
            .iter()
            .enumerate()
            .map(|(i, syllables)| {
                free_group.element_from_syllables(syllables).ok_or_else(|| {
                    BridgeError::Serialization(format!(
                        "relation {i} does not fit a free group of rank {}",
                        free_group.rank()
                    ))
                })
            })
            .collect::<BridgeResult<Vec<_>>>()?;
        Ok(Self::new(free_group, relations))
    }
}

impl fmt::Display for FinitelyPresentedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Finitely presented group < {} |",
            self.free_group.generator_names().join(", ")
        )?;
        for (i, relation) in self.relations.iter().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            write!(f, "{relation}")?;
        }
        f.write_str(" >")
    }
}

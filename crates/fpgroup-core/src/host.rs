// ─────────────────────────────────────────────────────────────────────
// FPGroup Bridge — Host Algebra Interface
// ─────────────────────────────────────────────────────────────────────
//! The capabilities a host algebra system must offer so that
//! presentations can be rebuilt inside it.
//!
//! `NativeAlgebra` is the in-crate reference host. The PyO3 layer
//! provides a second host backed by Sage objects, where every
//! operation may raise a Python exception; that is why each method
//! returns the host's own error type.

use fpgroup_types::{BridgeConfig, BridgeError, BridgeResult};

use crate::free_group::{FreeGroup, FreeGroupElement};
use crate::quotient::FinitelyPresentedGroup;

/// Free-group and quotient construction in a host algebra system.
pub trait HostAlgebra {
    /// Host failure type. Bridge-level failures (such as rejected input)
    /// must be expressible in it.
    type Error: From<BridgeError>;
    type FreeGroup;
    type Element: Clone;
    type Quotient;

    /// A fresh free group of the given rank.
    fn free_group(&self, rank: usize) -> Result<Self::FreeGroup, Self::Error>;

    /// Generators of `group`, in the same order as the source indexing.
    fn generators(&self, group: &Self::FreeGroup) -> Result<Vec<Self::Element>, Self::Error>;

    /// The multiplicative identity of `group`.
    fn identity(&self, group: &Self::FreeGroup) -> Result<Self::Element, Self::Error>;

    /// `base` raised to a signed integer power.
    fn pow(&self, base: &Self::Element, exponent: i64) -> Result<Self::Element, Self::Error>;

    /// The product `lhs * rhs`.
    fn mul(&self, lhs: &Self::Element, rhs: &Self::Element)
        -> Result<Self::Element, Self::Error>;

    /// `group` quotiented by `relators`, in the given order.
    fn quotient(
        &self,
        group: Self::FreeGroup,
        relators: Vec<Self::Element>,
    ) -> Result<Self::Quotient, Self::Error>;
}

/// Host backed by this crate's `FreeGroup` and `FinitelyPresentedGroup`.
#[derive(Debug, Clone)]
pub struct NativeAlgebra {
    generator_prefix: String,
}

impl Default for NativeAlgebra {
    fn default() -> Self {
        Self::new("x")
    }
}

impl NativeAlgebra {
    pub fn new(generator_prefix: impl Into<String>) -> Self {
        Self {
            generator_prefix: generator_prefix.into(),
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(config.generator_prefix.clone())
    }

    pub fn generator_prefix(&self) -> &str {
        &self.generator_prefix
    }
}

impl HostAlgebra for NativeAlgebra {
    type Error = BridgeError;
    type FreeGroup = FreeGroup;
    type Element = FreeGroupElement;
    type Quotient = FinitelyPresentedGroup;

    fn free_group(&self, rank: usize) -> BridgeResult<FreeGroup> {
        Ok(FreeGroup::with_prefix(rank, &self.generator_prefix))
    }

    fn generators(&self, group: &FreeGroup) -> BridgeResult<Vec<FreeGroupElement>> {
        Ok(group.generators())
    }

    fn identity(&self, group: &FreeGroup) -> BridgeResult<FreeGroupElement> {
        Ok(group.identity())
    }

    fn pow(&self, base: &FreeGroupElement, exponent: i64) -> BridgeResult<FreeGroupElement> {
        Ok(base.try_pow(exponent)?)
    }

    fn mul(
        &self,
        lhs: &FreeGroupElement,
        rhs: &FreeGroupElement,
    ) -> BridgeResult<FreeGroupElement> {
        if lhs.rank() != rhs.rank() {
            return Err(BridgeError::Host(format!(
                "cannot multiply elements of free groups of rank {} and {}",
                lhs.rank(),
                rhs.rank()
            )));
        }
        Ok(lhs.try_mul(rhs)?)
    }

    fn quotient(
        &self,
        group: FreeGroup,
        relators: Vec<FreeGroupElement>,
    ) -> BridgeResult<FinitelyPresentedGroup> {
        if let Some(stray) = relators.iter().position(|r| !group.contains(r)) {
            return Err(BridgeError::Host(format!(
                "relator {stray} does not belong to the free group being quotiented"
            )));
        }
        Ok(FinitelyPresentedGroup::new(group, relators))
    }
}

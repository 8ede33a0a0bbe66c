// ─────────────────────────────────────────────────────────────────────
// FPGroup Bridge — Presentation Converter
// ─────────────────────────────────────────────────────────────────────
//! Rebuilds a finitely presented group inside a host algebra system.
//!
//! The translation is word-for-word: one free group of the source's
//! rank, one host word per source relator, same order, no
//! simplification on the bridge side. Whatever reduction the host's
//! own multiplication performs is the host's business.

use fpgroup_types::{
    validate_source, BridgeConfig, BridgeResult, GroupExpressionTerm, PresentationSource,
};

use crate::host::{HostAlgebra, NativeAlgebra};
use crate::quotient::FinitelyPresentedGroup;

/// Fold a relator into a single host word, left to right.
///
/// Starts from the identity of `group`; each term `(g, e)` multiplies
/// in `generators[g]^e` using the host's own power operator.
///
/// # Panics
///
/// Panics if a term's generator index is not below `generators.len()`.
/// `PresentationConverter::convert` checks this before calling in.
pub fn convert_word<H: HostAlgebra>(
    host: &H,
    group: &H::FreeGroup,
    generators: &[H::Element],
    relator: &[GroupExpressionTerm],
) -> Result<H::Element, H::Error> {
    relator
        .iter()
        .try_fold(host.identity(group)?, |word, term| {
            let factor = host.pow(&generators[term.generator], term.exponent)?;
            host.mul(&word, &factor)
        })
}

/// Rebuild `source` in `host` as a free group of the same rank
/// quotiented by the translated relators, in source order.
///
/// Performs no validation; see `PresentationConverter` for the checked
/// entry point.
pub fn convert_presentation<H, P>(host: &H, source: &P) -> Result<H::Quotient, H::Error>
where
    H: HostAlgebra,
    P: PresentationSource + ?Sized,
{
    let group = host.free_group(source.generator_count())?;
    let generators = host.generators(&group)?;
    let relators = (0..source.relation_count())
        .map(|i| convert_word(host, &group, &generators, source.relation(i)))
        .collect::<Result<Vec<_>, _>>()?;
    host.quotient(group, relators)
}

/// Converter bound to one host and configuration.
///
/// Holds no state between calls: every conversion builds fresh host
/// objects and hands them to the caller.
pub struct PresentationConverter<H> {
    host: H,
    config: BridgeConfig,
}

impl<H: HostAlgebra> PresentationConverter<H> {
    pub fn new(host: H, config: BridgeConfig) -> Self {
        Self { host, config }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// See [`convert_word`].
    pub fn convert_word(
        &self,
        group: &H::FreeGroup,
        generators: &[H::Element],
        relator: &[GroupExpressionTerm],
    ) -> Result<H::Element, H::Error> {
        convert_word(&self.host, group, generators, relator)
    }

    /// Rebuild `source` in the host.
    ///
    /// With `validate_generators` set, malformed terms are rejected
    /// before any host object is allocated.
    pub fn convert<P>(&self, source: &P) -> Result<H::Quotient, H::Error>
    where
        P: PresentationSource + ?Sized,
    {
        if self.config.validate_generators {
            validate_source(source)?;
        }
        log::debug!(
            "converting presentation: {} generators, {} relations",
            source.generator_count(),
            source.relation_count()
        );
        convert_presentation(&self.host, source)
    }
}

impl PresentationConverter<NativeAlgebra> {
    /// Converter targeting the native host, labeled per `config`.
    pub fn native(config: BridgeConfig) -> Self {
        Self::new(NativeAlgebra::from_config(&config), config)
    }
}

/// Borrowed presentation with its host-native conversion attached.
///
/// ```
/// use fpgroup_core::HostView;
/// use fpgroup_types::{GroupExpression, GroupPresentation};
///
/// let mut p = GroupPresentation::new(2);
/// p.add_relation(GroupExpression::from_terms([(0usize, 2i64)]));
/// let group = HostView::new(&p).native().unwrap();
/// assert_eq!(group.to_string(), "Finitely presented group < x0, x1 | x0^2 >");
/// ```
pub struct HostView<'a, P: ?Sized> {
    source: &'a P,
}

impl<'a, P: PresentationSource + ?Sized> HostView<'a, P> {
    pub fn new(source: &'a P) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'a P {
        self.source
    }

    /// The presentation as a native `FinitelyPresentedGroup`.
    pub fn native(&self) -> BridgeResult<FinitelyPresentedGroup> {
        PresentationConverter::native(BridgeConfig::default()).convert(self.source)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use fpgroup_types::{BridgeError, GroupExpression, GroupPresentation};

    use super::*;
    use crate::free_group::{FreeGroup, FreeGroupElement};

    fn presentation(generators: usize, relations: &[&[(usize, i64)]]) -> GroupPresentation {
        let mut p = GroupPresentation::new(generators);
        for r in relations {
            p.add_relation(GroupExpression::from_terms(r.iter().copied()));
        }
        p
    }

    fn native(p: &GroupPresentation) -> FinitelyPresentedGroup {
        HostView::new(p).native().unwrap()
    }

    #[test]
    fn test_no_relations_gives_free_group() {
        for n in 0..5 {
            let g = native(&GroupPresentation::new(n));
            assert_eq!(g.ngens(), n);
            assert!(g.relations().is_empty());
        }
    }

    #[test]
    fn test_relation_count_and_order_preserved() {
        let p = presentation(3, &[&[(2, 1)], &[(0, 1)], &[(1, 1)], &[(0, 1)]]);
        let g = native(&p);
        let rendered: Vec<String> = g.relations().iter().map(|r| r.to_string()).collect();
        assert_eq!(rendered, ["x2", "x0", "x1", "x0"]);
    }

    #[test]
    fn test_single_term_powers() {
        let f = FreeGroup::new(2);
        let x1 = f.generator(1).unwrap();
        for e in [1, -1, 2, -3] {
            let g = native(&presentation(2, &[&[(1, e)]]));
            assert_eq!(g.relations()[0], x1.pow(e), "exponent {e}");
        }
    }

    #[test]
    fn test_conjugate_keeps_term_order() {
        let g = native(&presentation(2, &[&[(0, 1), (1, 1), (0, -1)]]));
        let gens = g.gens();
        let expected = &(&gens[0] * &gens[1]) * &gens[0].inverse();
        assert_eq!(g.relations()[0], expected);

        let swapped = native(&presentation(2, &[&[(1, 1), (0, 1), (0, -1)]]));
        assert_ne!(swapped.relations()[0], g.relations()[0]);
    }

    #[test]
    fn test_empty_relator_is_identity() {
        let g = native(&presentation(2, &[&[]]));
        assert_eq!(g.relations().len(), 1);
        assert!(g.relations()[0].is_identity());
    }

    #[test]
    fn test_repeated_conversion_structurally_equal() {
        let p = presentation(2, &[&[(0, 2)], &[(1, 3), (0, -1)]]);
        let first = native(&p);
        let second = native(&p);
        assert_eq!(first, second);
        assert!(!first.free_group().contains(&second.relations()[0]));
    }

    #[test]
    fn test_two_generator_scenario() {
        let g = native(&presentation(2, &[&[(0, 2)], &[(1, 3), (0, -1)]]));
        assert_eq!(g.ngens(), 2);
        let gens = g.gens();
        assert_eq!(g.relations()[0], gens[0].pow(2));
        assert_eq!(g.relations()[1], &gens[1].pow(3) * &gens[0].pow(-1));
        assert_eq!(
            g.to_string(),
            "Finitely presented group < x0, x1 | x0^2, x1^3*x0^-1 >"
        );
        assert_eq!(g.tietze_relations(), Ok(vec![vec![1, 1], vec![2, 2, 2, -1]]));
    }

    #[test]
    fn test_source_untouched() {
        let p = presentation(1, &[&[(0, 1), (0, -1)]]);
        let before = p.clone();
        let _ = native(&p);
        assert_eq!(p, before);
    }

    #[test]
    fn test_out_of_range_rejected_at_boundary() {
        let p = presentation(2, &[&[(0, 1)], &[(1, 1), (2, -1)]]);
        let err = HostView::new(&p).native().unwrap_err();
        assert_eq!(
            err,
            BridgeError::GeneratorOutOfRange {
                relation: 1,
                term: 1,
                generator: 2,
                rank: 2
            }
        );
    }

    #[test]
    fn test_zero_exponent_rejected_at_boundary() {
        let p = presentation(1, &[&[(0, 0)]]);
        let err = HostView::new(&p).native().unwrap_err();
        assert_eq!(err, BridgeError::ZeroExponent { relation: 0, term: 0 });
    }

    #[test]
    fn test_validation_can_be_disabled() {
        let config = BridgeConfig {
            validate_generators: false,
            ..Default::default()
        };
        let p = presentation(1, &[&[(0, 0), (0, 2)]]);
        let g = PresentationConverter::native(config).convert(&p).unwrap();
        assert_eq!(g.relations()[0].to_string(), "x0^2");
    }

    #[test]
    #[should_panic]
    fn test_unchecked_out_of_range_panics() {
        let p = presentation(1, &[&[(1, 1)]]);
        let _ = convert_presentation(&NativeAlgebra::default(), &p);
    }

    #[test]
    fn test_convert_word_directly() {
        let host = NativeAlgebra::default();
        let group = host.free_group(2).unwrap();
        let gens = host.generators(&group).unwrap();
        let relator = [GroupExpressionTerm::new(1, -2), GroupExpressionTerm::new(0, 1)];
        let w = convert_word(&host, &group, &gens, &relator).unwrap();
        assert_eq!(w.to_string(), "x1^-2*x0");
        assert!(convert_word(&host, &group, &gens, &[]).unwrap().is_identity());
    }

    #[test]
    fn test_exponent_overflow_is_host_error() {
        let p = presentation(1, &[&[(0, i64::MAX), (0, 1)]]);
        let err = HostView::new(&p).native().unwrap_err();
        assert_eq!(
            err,
            BridgeError::Host("exponent overflow in generator 0".to_string())
        );

        let fits = presentation(1, &[&[(0, i64::MAX), (0, -1)]]);
        let g = HostView::new(&fits).native().unwrap();
        assert_eq!(g.relations()[0].to_string(), format!("x0^{}", i64::MAX - 1));
    }

    #[test]
    fn test_extreme_single_exponents() {
        let p = presentation(1, &[&[(0, i64::MIN)], &[(0, i64::MAX)]]);
        let g = HostView::new(&p).native().unwrap();
        assert_eq!(g.relations()[0].syllables()[0].exponent, i64::MIN);
        assert_eq!(g.relations()[1].syllables()[0].exponent, i64::MAX);
    }

    #[test]
    fn test_converter_method_word_matches_free_function() {
        let converter = PresentationConverter::native(BridgeConfig {
            generator_prefix: "y".to_string(),
            ..Default::default()
        });
        assert_eq!(converter.config().generator_prefix, "y");
        assert_eq!(converter.host().generator_prefix(), "y");

        let host = converter.host();
        let group = host.free_group(2).unwrap();
        let gens = host.generators(&group).unwrap();
        let relator = [GroupExpressionTerm::new(0, 1), GroupExpressionTerm::new(1, -1)];
        let via_method = converter.convert_word(&group, &gens, &relator).unwrap();
        let via_fn = convert_word(host, &group, &gens, &relator).unwrap();
        assert_eq!(via_method, via_fn);
        assert_eq!(via_method.to_string(), "y0*y1^-1");
    }

    #[test]
    fn test_custom_prefix() {
        let config = BridgeConfig {
            generator_prefix: "g".to_string(),
            ..Default::default()
        };
        let p = presentation(2, &[&[(0, 1), (1, 1)]]);
        let g = PresentationConverter::native(config).convert(&p).unwrap();
        assert_eq!(g.to_string(), "Finitely presented group < g0, g1 | g0*g1 >");
    }

    /// Host that records calls, to pin down the fold protocol.
    #[derive(Default)]
    struct CountingHost {
        inner: NativeAlgebra,
        pows: Cell<usize>,
        muls: Cell<usize>,
    }

    impl HostAlgebra for CountingHost {
        type Error = BridgeError;
        type FreeGroup = FreeGroup;
        type Element = FreeGroupElement;
        type Quotient = FinitelyPresentedGroup;

        fn free_group(&self, rank: usize) -> BridgeResult<FreeGroup> {
            self.inner.free_group(rank)
        }

        fn generators(&self, group: &FreeGroup) -> BridgeResult<Vec<FreeGroupElement>> {
            self.inner.generators(group)
        }

        fn identity(&self, group: &FreeGroup) -> BridgeResult<FreeGroupElement> {
            self.inner.identity(group)
        }

        fn pow(&self, base: &FreeGroupElement, exponent: i64) -> BridgeResult<FreeGroupElement> {
            self.pows.set(self.pows.get() + 1);
            self.inner.pow(base, exponent)
        }

        fn mul(
            &self,
            lhs: &FreeGroupElement,
            rhs: &FreeGroupElement,
        ) -> BridgeResult<FreeGroupElement> {
            self.muls.set(self.muls.get() + 1);
            self.inner.mul(lhs, rhs)
        }

        fn quotient(
            &self,
            group: FreeGroup,
            relators: Vec<FreeGroupElement>,
        ) -> BridgeResult<FinitelyPresentedGroup> {
            self.inner.quotient(group, relators)
        }
    }

    #[test]
    fn test_one_host_power_per_term() {
        let host = CountingHost::default();
        let p = presentation(2, &[&[(0, -5)], &[(1, 3), (0, -1)], &[]]);
        convert_presentation(&host, &p).unwrap();
        assert_eq!(host.pows.get(), 3);
        assert_eq!(host.muls.get(), 3);
    }

    /// Host whose power operator always fails.
    struct FailingHost;

    impl HostAlgebra for FailingHost {
        type Error = BridgeError;
        type FreeGroup = FreeGroup;
        type Element = FreeGroupElement;
        type Quotient = FinitelyPresentedGroup;

        fn free_group(&self, rank: usize) -> BridgeResult<FreeGroup> {
            Ok(FreeGroup::new(rank))
        }

        fn generators(&self, group: &FreeGroup) -> BridgeResult<Vec<FreeGroupElement>> {
            Ok(group.generators())
        }

        fn identity(&self, group: &FreeGroup) -> BridgeResult<FreeGroupElement> {
            Ok(group.identity())
        }

        fn pow(&self, _base: &FreeGroupElement, _exponent: i64) -> BridgeResult<FreeGroupElement> {
            Err(BridgeError::Host("power not supported".to_string()))
        }

        fn mul(
            &self,
            lhs: &FreeGroupElement,
            rhs: &FreeGroupElement,
        ) -> BridgeResult<FreeGroupElement> {
            Ok(lhs * rhs)
        }

        fn quotient(
            &self,
            group: FreeGroup,
            relators: Vec<FreeGroupElement>,
        ) -> BridgeResult<FinitelyPresentedGroup> {
            Ok(FinitelyPresentedGroup::new(group, relators))
        }
    }

    #[test]
    fn test_host_error_propagates_unchanged() {
        let converter = PresentationConverter::new(FailingHost, BridgeConfig::default());
        let p = presentation(1, &[&[(0, 1)]]);
        assert_eq!(
            converter.convert(&p).unwrap_err(),
            BridgeError::Host("power not supported".to_string())
        );
        // Relator-free presentations never reach the power operator.
        assert!(converter.convert(&GroupPresentation::new(3)).is_ok());
    }
}

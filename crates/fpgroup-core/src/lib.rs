// ─────────────────────────────────────────────────────────────────────
// FPGroup Bridge — Core Conversion Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Native free-group algebra and the presentation converter that
//! rebuilds the topology engine's finitely presented groups inside a
//! host algebra system.
//!
//! # Conversion Invariants
//!
//! 1. **Word-for-word translation**: the result has the source's
//!    generator count and one relator per source relator, in source
//!    order. Each relator is the left-to-right product of
//!    `generators[g]^e` over its terms.
//!
//! 2. **No bridge-side simplification**: trivial and duplicate
//!    relators are kept. Only the host's own multiplication may reduce
//!    words (the native host freely reduces, as any free group does).
//!
//! 3. **Checked boundary**: with `validate_generators` on (the
//!    default), out-of-range generators and zero exponents are rejected
//!    before any host object is built. Host failures propagate
//!    unchanged, and no partial result escapes.
//!
//! 4. **Stateless**: every call builds fresh host objects owned by the
//!    caller. Repeated conversions are structurally equal.

pub mod converter;
pub mod environment;
pub mod free_group;
pub mod host;
pub mod quotient;

pub use converter::{convert_presentation, convert_word, HostView, PresentationConverter};
pub use environment::{global_dirs, initialize, GlobalDirs};
pub use free_group::{FreeGroup, FreeGroupElement, Syllable, WordError};
pub use host::{HostAlgebra, NativeAlgebra};
pub use quotient::FinitelyPresentedGroup;

// ─────────────────────────────────────────────────────────────────────
// FPGroup Bridge — Presentation Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Presentation data model, configuration, and error hierarchy for the
//! FPGroup Bridge, which hands finitely presented groups from the
//! topology engine to a host algebra system.

pub mod config;
pub mod error;
pub mod presentation;

pub use config::BridgeConfig;
pub use error::{BridgeError, BridgeResult};
pub use presentation::{
    validate_source, GroupExpression, GroupExpressionTerm, GroupPresentation, PresentationSource,
};

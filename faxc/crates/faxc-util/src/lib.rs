//! faxc-util — shared foundation types for the `faxc` workspace.
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate provides the infrastructure every other `faxc` crate builds
//! on: string interning (`Symbol`), typed indices (`Idx`/`IndexVec`),
//! definition identity (`DefId`), source locations (`Span`/`SourceMap`),
//! and the diagnostic reporter (`diagnostic::Handler`). None of it knows
//! anything about the Fax language's grammar or type system — it is pure
//! plumbing shared by the lexer, parser, and binder.
//!
//! DESIGN PRINCIPLES:
//! ------------------
//! 1. ZERO-COST ABSTRACTIONS — typed indices and interned symbols compile
//!    down to integer operations; there is no runtime tax for the safety
//!    they buy.
//! 2. TYPE SAFETY — `Idx`-tagged `IndexVec<I, T>` prevents mixing distinct
//!    id spaces (a `DefId` can never index a `RibId` vector by accident).
//! 3. SINGLE SOURCE OF TRUTH — each concept (symbols, spans, diagnostics,
//!    indices) lives in exactly one submodule; this file is a thin
//!    re-export surface, not a second implementation.

pub mod def_id;
pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use def_id::{DefId, DefIdGenerator};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level, SourceSnippet, Stage};
pub use error::{
    DiagnosticError, DiagnosticResult, IndexVecError, IndexVecResult, SourceMapError,
    SourceMapResult, SymbolError, SymbolResult,
};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;

pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;

/// Macro to define a newtype index wrapping `u32`, implementing [`Idx`].
///
/// Every per-pass id space (`RibId`, `BlockIndex`, `ParamId`, ...) is one
/// of these; the macro keeps their `Debug`/`Ord`/`Hash` derives and the
/// `Idx` impl in lockstep instead of hand-rolling each one.
#[macro_export]
macro_rules! define_idx {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $crate::Idx for $name {
            fn from_usize(idx: usize) -> Self {
                assert!(idx <= u32::MAX as usize);
                $name(idx as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

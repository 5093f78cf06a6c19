//! # arch-enforcer-php
//!
//! PHP support for arch-enforcer.
//!
//! - [`PhpExtractor`] implements [`NameExtractor`](arch_enforcer_core::NameExtractor)
//!   with a small hand-written scanner over PHP source text
//! - [`PhpBuiltins`] implements [`BuiltinSymbols`](arch_enforcer_core::BuiltinSymbols)
//!   from a table of core classes and functions

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builtins;
pub mod lexer;

pub use builtins::PhpBuiltins;
pub use lexer::PhpExtractor;

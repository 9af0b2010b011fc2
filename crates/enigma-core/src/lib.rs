//! Symbol alphabets and cycle-notation permutations.
//!
//! This crate holds the leaf types every rotor cipher component is built
//! from. It has no notion of rotors or stepping; those live in
//! `enigma-machine`.
//!
//! # Architecture
//!
//! - [`alphabet`] -- ordered symbol set with char-to-index and index-to-char mapping
//! - [`permutation`] -- bijection over `0..size` described by disjoint cycles
//!
//! An [`Alphabet`] is built once and shared read-only through an
//! [`Arc`](std::sync::Arc) by every permutation built against it.

pub mod alphabet;
pub mod permutation;

pub use alphabet::Alphabet;
pub use permutation::Permutation;

/// Error type for alphabet construction, symbol lookup and cycle parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("duplicate symbol '{0}' in alphabet")]
    DuplicateSymbol(char),
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,
    #[error("symbol '{0}' is not in the alphabet")]
    UnknownSymbol(char),
    #[error("index {index} is out of range for alphabet of size {size}")]
    IndexOutOfRange { index: usize, size: usize },
    #[error("malformed cycle specification: {0}")]
    MalformedCycleSpec(String),
}

//! Rotor stepping and signal-path engine.
//!
//! Emulates an electromechanical rotor cipher machine: a reflector, a stack
//! of static and moving rotors and an optional plugboard. Before every
//! symbol the machine advances its rotors under the double-stepping rule,
//! then routes the signal through the plugboard, right-to-left through the
//! rotors, off the reflector and back left-to-right.
//!
//! # Architecture
//!
//! - [`rotor`] -- rotor variants (fixed, set-once fixed, moving, reflector)
//! - [`machine`] -- slot array, advance set and the double-pass signal path
//! - [`config`] -- machine configuration and per-message setup parsing
//!
//! # Examples
//!
//! ```
//! use enigma_machine::config::{MachineConfig, Setup};
//! use enigma_machine::machine::Machine;
//!
//! let config = MachineConfig::parse(
//!     "ABCDEFGHIJKLMNOPQRSTUVWXYZ 5 3
//!      I    MQ (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//!      II   ME (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
//!      III  MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
//!      Beta N  (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//!      B    R  (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)",
//! )
//! .unwrap();
//!
//! let mut machine = Machine::new(&config).unwrap();
//! let setup = Setup::parse("* B Beta I II III AAAA", &config).unwrap();
//! machine.apply_setup(&setup).unwrap();
//!
//! assert_eq!(machine.convert("AAAAA").unwrap(), "BDZGO");
//! ```

pub mod config;
pub mod machine;
pub mod rotor;

use enigma_core::CoreError;

/// Error type for rotor settings, slot assignment and conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MachineError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("setting {setting} is out of range for rotor {rotor}")]
    SettingOutOfRange { rotor: String, setting: String },
    #[error("reflector {rotor} has only one position, cannot set it to {position}")]
    InvalidReflectorSetting { rotor: String, position: usize },
    #[error("unknown rotor name: {0}")]
    UnknownRotorName(String),
    #[error("rotor {0} named more than once")]
    DuplicateRotorName(String),
    #[error("slot 0 must hold a reflector, found {0}")]
    MissingReflector(String),
    #[error("rightmost rotor {0} does not rotate")]
    RightmostMustRotate(String),
    #[error("rotor {0} is a reflector and can only occupy slot 0")]
    MisplacedReflector(String),
    #[error("{count} moving rotors inserted but the machine has only {pawls} pawls")]
    TooManyMovingRotors { count: usize, pawls: usize },
    #[error("expected {expected} rotor names, got {actual}")]
    WrongRotorCount { expected: usize, actual: usize },
    #[error("expected {expected} setting symbols, got {actual}")]
    WrongSettingLength { expected: usize, actual: usize },
    #[error("symbol '{0}' is not in the alphabet")]
    SymbolNotInAlphabet(char),
    #[error("machine needs at least 2 rotor slots, got {0}")]
    InvalidSlotCount(usize),
    #[error("pawl count {pawls} must be less than slot count {slots}")]
    InvalidPawlCount { pawls: usize, slots: usize },
    #[error("{what} uses alphabet \"{actual}\", machine alphabet is \"{expected}\"")]
    AlphabetMismatch {
        what: String,
        expected: String,
        actual: String,
    },
    #[error("no rotors inserted")]
    RotorsNotInserted,
}

/// Error type for configuration files and setup lines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration truncated: missing {0}")]
    Truncated(&'static str),
    #[error("alphabet \"{0}\" may not contain '(', ')' or '*'")]
    InvalidAlphabet(String),
    #[error("invalid {field}: \"{value}\" is not a non-negative integer")]
    InvalidNumber { field: &'static str, value: String },
    #[error("bad rotor description: {0}")]
    BadRotorDescription(String),
    #[error("setup line must start with '*': \"{0}\"")]
    MissingSetupMarker(String),
    #[error("setup line needs {expected} rotor names and a setting, got {actual} fields")]
    SetupTooShort { expected: usize, actual: usize },
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Machine(#[from] MachineError),
}

// Machine configuration files and per-message setup lines.
//
// Configuration (whitespace-tokenized):
//
//   ABCDEFGHIJKLMNOPQRSTUVWXYZ 5 3
//   I    MQ (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//   Beta N  (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//   B    R  (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)
//
// Setup line:
//
//   * B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)

use std::sync::Arc;

use enigma_core::{Alphabet, CoreError, Permutation};

use crate::rotor::Rotor;
use crate::{ConfigError, MachineError};

/// Marker that starts a setup line.
pub const SETUP_MARKER: char = '*';

/// Role of a catalog rotor, from the type token of its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorRole {
    /// `M<notches>`: rotating rotor; each following character is a notch.
    Moving { notches: String },
    /// `N`: non-rotating rotor that keeps the first setting it is given.
    NonMoving,
    /// `R`: reflector.
    Reflector,
}

/// Description of one available rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorSpec {
    pub name: String,
    pub role: RotorRole,
    /// Wiring at setting 0, in cycle notation.
    pub wiring: String,
}

impl RotorSpec {
    /// Instantiate the rotor over `alphabet`, at setting 0.
    pub fn build(&self, alphabet: &Arc<Alphabet>) -> Result<Rotor, MachineError> {
        let permutation = Permutation::parse(&self.wiring, alphabet.clone())?;
        match &self.role {
            RotorRole::Moving { notches } => Rotor::moving(&self.name, permutation, notches),
            RotorRole::NonMoving => Ok(Rotor::fixed_once(&self.name, permutation)),
            RotorRole::Reflector => Ok(Rotor::reflector(&self.name, permutation)),
        }
    }
}

/// Everything needed to build a [`Machine`](crate::machine::Machine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    pub alphabet: Arc<Alphabet>,
    /// Rotor slots, reflector included.
    pub num_slots: usize,
    pub num_pawls: usize,
    /// Available rotors.
    pub rotors: Vec<RotorSpec>,
}

impl MachineConfig {
    /// Parse and validate a configuration file's contents.
    ///
    /// Every wiring and notch is checked against the alphabet here, so a
    /// configuration that parses always builds a machine.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut tokens = text.split_whitespace().peekable();

        let alphabet_token = tokens.next().ok_or(ConfigError::Truncated("alphabet"))?;
        if alphabet_token.contains(['(', ')', SETUP_MARKER]) {
            return Err(ConfigError::InvalidAlphabet(alphabet_token.to_string()));
        }
        let alphabet = Arc::new(Alphabet::new(alphabet_token)?);

        let num_slots = parse_count(tokens.next(), "rotor slot count")?;
        let num_pawls = parse_count(tokens.next(), "pawl count")?;

        let mut rotors = Vec::new();
        while let Some(name) = tokens.next() {
            if name.contains(['(', ')']) {
                return Err(ConfigError::BadRotorDescription(format!(
                    "expected a rotor name, found \"{name}\""
                )));
            }
            let type_token = tokens.next().ok_or_else(|| {
                ConfigError::BadRotorDescription(format!("rotor {name} has no type"))
            })?;
            let role = parse_role(name, type_token)?;

            let mut wiring = String::new();
            while let Some(cycle) = tokens.next_if(|t| t.starts_with('(')) {
                wiring.push_str(cycle);
            }

            rotors.push(RotorSpec {
                name: name.to_string(),
                role,
                wiring,
            });
        }

        let config = Self {
            alphabet,
            num_slots,
            num_pawls,
            rotors,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check slot and pawl counts, catalog name uniqueness, and that every
    /// rotor description builds against the alphabet.
    pub fn validate(&self) -> Result<(), MachineError> {
        if self.num_slots < 2 {
            return Err(MachineError::InvalidSlotCount(self.num_slots));
        }
        if self.num_pawls >= self.num_slots {
            return Err(MachineError::InvalidPawlCount {
                pawls: self.num_pawls,
                slots: self.num_slots,
            });
        }
        for (i, spec) in self.rotors.iter().enumerate() {
            if self.rotors[..i].iter().any(|s| s.name == spec.name) {
                return Err(MachineError::DuplicateRotorName(spec.name.clone()));
            }
            spec.build(&self.alphabet)?;
        }
        Ok(())
    }

    /// Look up a catalog rotor by name.
    pub fn rotor(&self, name: &str) -> Option<&RotorSpec> {
        self.rotors.iter().find(|s| s.name == name)
    }
}

fn parse_count(token: Option<&str>, field: &'static str) -> Result<usize, ConfigError> {
    let token = token.ok_or(ConfigError::Truncated(field))?;
    token.parse().map_err(|_| ConfigError::InvalidNumber {
        field,
        value: token.to_string(),
    })
}

fn parse_role(name: &str, type_token: &str) -> Result<RotorRole, ConfigError> {
    let mut chars = type_token.chars();
    let role = match chars.next() {
        Some('M') => RotorRole::Moving {
            notches: chars.as_str().to_string(),
        },
        Some('N') if chars.as_str().is_empty() => RotorRole::NonMoving,
        Some('R') if chars.as_str().is_empty() => RotorRole::Reflector,
        _ => {
            return Err(ConfigError::BadRotorDescription(format!(
                "rotor {name} has invalid type \"{type_token}\""
            )));
        }
    };
    Ok(role)
}

/// Per-message declaration of rotors, their initial settings and the
/// plugboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    /// One catalog name per slot; `slot_names[0]` is the reflector.
    pub slot_names: Vec<String>,
    /// One symbol per slot after the reflector.
    pub initial_offsets: String,
    /// Plugboard wiring in cycle notation; empty for no plugs.
    pub plugboard_cycles: String,
}

impl Setup {
    /// Returns `true` if `line` is a setup line rather than a message.
    pub fn is_setup_line(line: &str) -> bool {
        line.trim_start().starts_with(SETUP_MARKER)
    }

    /// Parse a setup line for a machine built from `config`.
    ///
    /// Only the shape of the line is checked here (marker, field count,
    /// distinct names, plugboard tokens); rotor names and settings are
    /// checked when the setup is applied.
    pub fn parse(line: &str, config: &MachineConfig) -> Result<Self, ConfigError> {
        let rest = line
            .trim_start()
            .strip_prefix(SETUP_MARKER)
            .ok_or_else(|| ConfigError::MissingSetupMarker(line.to_string()))?;

        let fields: Vec<&str> = rest.split_whitespace().collect();
        let n = config.num_slots;
        if fields.len() < n + 1 {
            return Err(ConfigError::SetupTooShort {
                expected: n + 1,
                actual: fields.len(),
            });
        }

        let names = &fields[..n];
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(MachineError::DuplicateRotorName(name.to_string()).into());
            }
        }

        let plugs = &fields[n + 1..];
        if let Some(bad) = plugs.iter().find(|t| !t.starts_with('(')) {
            return Err(CoreError::MalformedCycleSpec(format!(
                "plugboard field \"{bad}\" is not a cycle"
            ))
            .into());
        }

        Ok(Self {
            slot_names: names.iter().map(|s| s.to_string()).collect(),
            initial_offsets: fields[n].to_string(),
            plugboard_cycles: plugs.join(" "),
        })
    }
}

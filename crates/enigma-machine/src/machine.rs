// Machine: rotor slots, the double-stepping advance rule and the signal path.
//
// Slot 0 is the reflector, slot N-1 the fast rotor driven by every key
// press. The advance set for a tick is computed from the notch state left
// by the previous tick and applied all at once.

use std::sync::Arc;

use enigma_core::{Alphabet, CoreError, Permutation};
use tracing::{debug, trace, warn};

use crate::MachineError;
use crate::config::{MachineConfig, Setup};
use crate::rotor::Rotor;

/// A complete rotor cipher machine.
///
/// Built once from a catalog of available rotors; [`insert_rotors`],
/// [`set_rotors`] and [`set_plugboard`] prepare it for a message batch, and
/// every converted symbol advances the rotors in place.
///
/// [`insert_rotors`]: Self::insert_rotors
/// [`set_rotors`]: Self::set_rotors
/// [`set_plugboard`]: Self::set_plugboard
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Arc<Alphabet>,
    num_slots: usize,
    num_pawls: usize,
    /// Prototypes of every available rotor, at setting 0.
    catalog: Vec<Rotor>,
    /// Rotors currently in the machine, left to right. Empty until
    /// `insert_rotors` succeeds.
    slots: Vec<Rotor>,
    plugboard: Option<Permutation>,
    /// Number of moving rotors among `slots`.
    moving_count: usize,
}

impl Machine {
    /// Build a machine from a parsed configuration, instantiating every
    /// catalog rotor against the configuration's alphabet.
    pub fn new(config: &MachineConfig) -> Result<Self, MachineError> {
        let catalog = config
            .rotors
            .iter()
            .map(|spec| spec.build(&config.alphabet))
            .collect::<Result<Vec<_>, _>>()?;
        Self::with_catalog(
            config.alphabet.clone(),
            config.num_slots,
            config.num_pawls,
            catalog,
        )
    }

    /// Build a machine with `num_slots` slots (reflector included) and
    /// `num_pawls` pawls from already constructed rotors.
    ///
    /// # Errors
    ///
    /// - [`MachineError::InvalidSlotCount`] if `num_slots < 2`.
    /// - [`MachineError::InvalidPawlCount`] if `num_pawls >= num_slots`.
    /// - [`MachineError::DuplicateRotorName`] if two catalog rotors share a name.
    /// - [`MachineError::AlphabetMismatch`] if a rotor is wired over another alphabet.
    pub fn with_catalog(
        alphabet: Arc<Alphabet>,
        num_slots: usize,
        num_pawls: usize,
        catalog: Vec<Rotor>,
    ) -> Result<Self, MachineError> {
        if num_slots < 2 {
            return Err(MachineError::InvalidSlotCount(num_slots));
        }
        if num_pawls >= num_slots {
            return Err(MachineError::InvalidPawlCount {
                pawls: num_pawls,
                slots: num_slots,
            });
        }
        for (i, rotor) in catalog.iter().enumerate() {
            if catalog[..i].iter().any(|r| r.name() == rotor.name()) {
                return Err(MachineError::DuplicateRotorName(rotor.name().to_string()));
            }
            check_alphabet(&alphabet, rotor.alphabet(), || format!("rotor {}", rotor.name()))?;
        }

        debug!(
            alphabet = %alphabet,
            num_slots,
            num_pawls,
            catalog = catalog.len(),
            "machine built"
        );

        Ok(Self {
            alphabet,
            num_slots,
            num_pawls,
            catalog,
            slots: Vec::new(),
            plugboard: None,
            moving_count: 0,
        })
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Number of rotor slots, reflector included.
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Number of pawls, the most moving rotors the machine can drive.
    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Rotors currently in the machine, left to right.
    pub fn rotors(&self) -> &[Rotor] {
        &self.slots
    }

    /// Available rotors.
    pub fn catalog(&self) -> &[Rotor] {
        &self.catalog
    }

    /// Number of moving rotors currently inserted.
    pub fn moving_count(&self) -> usize {
        self.moving_count
    }

    pub fn plugboard(&self) -> Option<&Permutation> {
        self.plugboard.as_ref()
    }

    /// Fill the slots with fresh copies of the catalog rotors named by
    /// `names` (`names[0]` is the reflector), all at setting 0.
    ///
    /// On error the previously inserted rotors stay in place.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), MachineError> {
        if names.len() != self.num_slots {
            return Err(MachineError::WrongRotorCount {
                expected: self.num_slots,
                actual: names.len(),
            });
        }

        let mut slots = Vec::with_capacity(self.num_slots);
        for (i, name) in names.iter().enumerate() {
            let name = name.as_ref();
            if names[..i].iter().any(|n| n.as_ref() == name) {
                return Err(MachineError::DuplicateRotorName(name.to_string()));
            }
            let rotor = self
                .catalog
                .iter()
                .find(|r| r.name() == name)
                .ok_or_else(|| MachineError::UnknownRotorName(name.to_string()))?;
            slots.push(rotor.clone());
        }

        if !slots[0].reflecting() {
            return Err(MachineError::MissingReflector(slots[0].name().to_string()));
        }
        if let Some(r) = slots[1..].iter().find(|r| r.reflecting()) {
            return Err(MachineError::MisplacedReflector(r.name().to_string()));
        }
        let rightmost = &slots[self.num_slots - 1];
        if !rightmost.rotates() {
            return Err(MachineError::RightmostMustRotate(rightmost.name().to_string()));
        }
        let moving_count = slots.iter().filter(|r| r.rotates()).count();
        if moving_count > self.num_pawls {
            return Err(MachineError::TooManyMovingRotors {
                count: moving_count,
                pawls: self.num_pawls,
            });
        }

        if !slots[0].permutation().derangement() {
            warn!(
                reflector = slots[0].name(),
                "reflector wiring has fixed points"
            );
        }
        let inserted: Vec<&str> = slots.iter().map(Rotor::name).collect();
        debug!(rotors = ?inserted, moving_count, "rotors inserted");

        self.slots = slots;
        self.moving_count = moving_count;
        Ok(())
    }

    /// Set slots `1..num_slots` from `setting`, one symbol per slot, left to
    /// right. The reflector is never set here.
    ///
    /// The whole string is validated before any rotor changes.
    pub fn set_rotors(&mut self, setting: &str) -> Result<(), MachineError> {
        if self.slots.is_empty() {
            return Err(MachineError::RotorsNotInserted);
        }
        let symbols: Vec<char> = setting.chars().collect();
        if symbols.len() != self.num_slots - 1 {
            return Err(MachineError::WrongSettingLength {
                expected: self.num_slots - 1,
                actual: symbols.len(),
            });
        }
        if let Some(&c) = symbols.iter().find(|&&c| !self.alphabet.contains(c)) {
            return Err(MachineError::SymbolNotInAlphabet(c));
        }

        let mut slots = self.slots.clone();
        for (rotor, &c) in slots[1..].iter_mut().zip(&symbols) {
            rotor.set_symbol(c)?;
        }
        self.slots = slots;
        debug!(setting, window = %self.settings(), "rotors set");
        Ok(())
    }

    /// Install `plugboard`. The identity permutation is allowed.
    pub fn set_plugboard(&mut self, plugboard: Permutation) -> Result<(), MachineError> {
        check_alphabet(&self.alphabet, plugboard.alphabet(), || "plugboard".to_string())?;
        debug!(plugboard = %plugboard, "plugboard set");
        self.plugboard = Some(plugboard);
        Ok(())
    }

    /// Remove the plugboard.
    pub fn clear_plugboard(&mut self) {
        self.plugboard = None;
    }

    /// Prepare the machine for a message batch: insert the named rotors, set
    /// them, and install the plugboard.
    pub fn apply_setup(&mut self, setup: &Setup) -> Result<(), MachineError> {
        let plugboard = Permutation::parse(&setup.plugboard_cycles, self.alphabet.clone())?;
        self.insert_rotors(setup.slot_names.as_slice())?;
        self.set_rotors(&setup.initial_offsets)?;
        self.set_plugboard(plugboard)
    }

    /// Current window symbols of slots `1..num_slots`, left to right.
    pub fn settings(&self) -> String {
        self.slots.iter().skip(1).map(Rotor::setting_symbol).collect()
    }

    /// Which slots advance on the next key press.
    ///
    /// The rightmost slot always advances. Slot `i` in `1..N-1` advances if
    /// the rotor to its right is at a notch, or if it is at its own notch
    /// and the rotor to its left can rotate (the double step).
    pub fn advance_set(&self) -> Vec<bool> {
        let n = self.slots.len();
        let mut advances = vec![false; n];
        if n < 2 {
            return advances;
        }
        advances[n - 1] = true;
        for i in (1..n - 1).rev() {
            advances[i] = self.slots[i + 1].at_notch()
                || (self.slots[i - 1].rotates() && self.slots[i].at_notch());
        }
        advances
    }

    /// Advance the rotors for one key press.
    fn step(&mut self) {
        let advances = self.advance_set();
        trace!(?advances, "tick");
        for (rotor, advance) in self.slots.iter_mut().zip(advances) {
            if advance {
                rotor.advance();
            }
        }
    }

    /// Advance the machine, then encode the symbol at `index`.
    pub fn convert_index(&mut self, index: usize) -> Result<usize, MachineError> {
        if self.slots.is_empty() {
            return Err(MachineError::RotorsNotInserted);
        }
        if index >= self.alphabet.size() {
            return Err(CoreError::IndexOutOfRange {
                index,
                size: self.alphabet.size(),
            }
            .into());
        }

        self.step();

        let mut signal = match &self.plugboard {
            Some(p) => p.permute(index),
            None => index,
        };
        for rotor in self.slots.iter().rev() {
            signal = rotor.convert_forward(signal);
        }
        for rotor in &self.slots[1..] {
            signal = rotor.convert_backward(signal);
        }
        if let Some(p) = &self.plugboard {
            signal = p.invert(signal);
        }
        Ok(signal)
    }

    /// Encode (or decode) `message`, advancing once per non-whitespace
    /// symbol. Whitespace is copied through unchanged.
    ///
    /// The message is checked against the alphabet before the first symbol
    /// is converted, so a rejected message leaves the rotors untouched.
    pub fn convert(&mut self, message: &str) -> Result<String, MachineError> {
        if self.slots.is_empty() {
            return Err(MachineError::RotorsNotInserted);
        }
        if let Some(c) = message
            .chars()
            .find(|&c| !c.is_whitespace() && !self.alphabet.contains(c))
        {
            return Err(MachineError::SymbolNotInAlphabet(c));
        }

        let alphabet = self.alphabet.clone();
        let mut out = String::with_capacity(message.len());
        for c in message.chars() {
            if c.is_whitespace() {
                out.push(c);
                continue;
            }
            let index = self.convert_index(alphabet.to_index(c)?)?;
            out.push(alphabet.to_symbol(index)?);
        }
        Ok(out)
    }
}

fn check_alphabet(
    machine: &Alphabet,
    other: &Alphabet,
    what: impl FnOnce() -> String,
) -> Result<(), MachineError> {
    if machine != other {
        return Err(MachineError::AlphabetMismatch {
            what: what(),
            expected: machine.to_string(),
            actual: other.to_string(),
        });
    }
    Ok(())
}

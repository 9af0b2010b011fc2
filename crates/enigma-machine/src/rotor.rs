// Rotor variants: fixed, set-once fixed, moving and reflector.
//
// A rotor is a permutation (its wiring at setting 0) plus a rotational
// setting. A signal entering at contact `p` meets wiring contact
// `p + setting`, and leaves shifted back by `setting`.

use std::sync::Arc;

use enigma_core::{Alphabet, CoreError, Permutation};

use crate::MachineError;

/// Behavioral variant of a rotor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Non-rotating rotor whose setting may be changed freely.
    Fixed,
    /// Non-rotating rotor that keeps the first setting it is given.
    /// Later `set` calls succeed without changing anything.
    FixedOnce { locked: bool },
    /// Rotating rotor. When its setting equals one of `notches`, the rotor
    /// to its left is eligible to advance.
    Moving { notches: Vec<usize> },
    /// Leftmost rotor that turns the signal back. Its setting is always 0.
    Reflector,
}

/// A substitution rotor in one of the [`RotorKind`] variants.
#[derive(Debug, Clone)]
pub struct Rotor {
    name: String,
    /// Wiring at setting 0.
    permutation: Permutation,
    /// Current rotational position, `0..size`.
    setting: usize,
    kind: RotorKind,
}

impl Rotor {
    /// A non-rotating rotor that accepts any number of settings.
    pub fn fixed(name: impl Into<String>, permutation: Permutation) -> Self {
        Self::with_kind(name, permutation, RotorKind::Fixed)
    }

    /// A non-rotating rotor that keeps only its first setting.
    pub fn fixed_once(name: impl Into<String>, permutation: Permutation) -> Self {
        Self::with_kind(name, permutation, RotorKind::FixedOnce { locked: false })
    }

    /// A rotating rotor with a notch at every symbol of `notches`.
    ///
    /// Fails with [`CoreError::UnknownSymbol`] if a notch is not in the
    /// rotor's alphabet.
    pub fn moving(
        name: impl Into<String>,
        permutation: Permutation,
        notches: &str,
    ) -> Result<Self, MachineError> {
        let alphabet = permutation.alphabet();
        let notches = notches
            .chars()
            .map(|c| alphabet.to_index(c))
            .collect::<Result<Vec<_>, CoreError>>()?;
        Ok(Self::with_kind(
            name,
            permutation,
            RotorKind::Moving { notches },
        ))
    }

    /// A reflector.
    pub fn reflector(name: impl Into<String>, permutation: Permutation) -> Self {
        Self::with_kind(name, permutation, RotorKind::Reflector)
    }

    fn with_kind(name: impl Into<String>, permutation: Permutation, kind: RotorKind) -> Self {
        Self {
            name: name.into(),
            permutation,
            setting: 0,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        self.permutation.alphabet()
    }

    /// Size of the rotor's alphabet (number of contacts).
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    /// Returns `true` iff the rotor has a ratchet and can advance.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// Returns `true` iff the rotor is a reflector.
    pub fn reflecting(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// Notch positions; empty for anything but a moving rotor.
    pub fn notches(&self) -> &[usize] {
        match &self.kind {
            RotorKind::Moving { notches } => notches,
            _ => &[],
        }
    }

    /// Current setting as an index.
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Current setting as the symbol shown in the machine's window.
    pub fn setting_symbol(&self) -> char {
        self.alphabet().symbols()[self.setting]
    }

    /// Set the rotor to `position`.
    ///
    /// # Errors
    ///
    /// - [`MachineError::SettingOutOfRange`] if `position` is not a valid index.
    /// - [`MachineError::InvalidReflectorSetting`] for a nonzero reflector setting.
    pub fn set(&mut self, position: usize) -> Result<(), MachineError> {
        if position >= self.size() {
            return Err(MachineError::SettingOutOfRange {
                rotor: self.name.clone(),
                setting: position.to_string(),
            });
        }
        match &mut self.kind {
            RotorKind::Reflector => {
                if position != 0 {
                    return Err(MachineError::InvalidReflectorSetting {
                        rotor: self.name.clone(),
                        position,
                    });
                }
            }
            RotorKind::FixedOnce { locked } => {
                if !*locked {
                    self.setting = position;
                    *locked = true;
                }
            }
            RotorKind::Fixed | RotorKind::Moving { .. } => self.setting = position,
        }
        Ok(())
    }

    /// Set the rotor to the position of `symbol`.
    pub fn set_symbol(&mut self, symbol: char) -> Result<(), MachineError> {
        let position =
            self.alphabet()
                .to_index(symbol)
                .map_err(|_| MachineError::SettingOutOfRange {
                    rotor: self.name.clone(),
                    setting: format!("'{symbol}'"),
                })?;
        self.set(position)
    }

    /// Signal entering at contact `p` on the right, leaving on the left.
    pub fn convert_forward(&self, p: usize) -> usize {
        match self.kind {
            RotorKind::Reflector => self.permutation.permute(p),
            _ => {
                let contact = (p + self.setting) % self.size();
                let exited = self.permutation.permute(contact);
                self.permutation
                    .wrap(exited as isize - self.setting as isize)
            }
        }
    }

    /// Signal entering at contact `e` on the left, leaving on the right.
    ///
    /// A machine never routes a signal back through its reflector; for one,
    /// this is the plain inverse wiring.
    pub fn convert_backward(&self, e: usize) -> usize {
        match self.kind {
            RotorKind::Reflector => self.permutation.invert(e),
            _ => {
                let contact = (e + self.setting) % self.size();
                let exited = self.permutation.invert(contact);
                self.permutation
                    .wrap(exited as isize - self.setting as isize)
            }
        }
    }

    /// Returns `true` iff the rotor is positioned to let its left neighbor advance.
    pub fn at_notch(&self) -> bool {
        match &self.kind {
            RotorKind::Moving { notches } => notches.contains(&self.setting),
            _ => false,
        }
    }

    /// Advance one position. No-op for rotors that do not rotate.
    pub fn advance(&mut self) {
        if let RotorKind::Moving { .. } = self.kind {
            self.setting = (self.setting + 1) % self.size();
        }
    }
}

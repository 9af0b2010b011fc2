// Permutations over an alphabet, written in cycle notation.
//
// "(AELTPHQXRU) (BKNW) (S)" maps A->E->L->...->U->A, B->K->N->W->B and
// leaves S (and every unlisted symbol) fixed.

use std::fmt;
use std::sync::Arc;

use crate::{Alphabet, CoreError};

/// Position of an index inside the cycle list: `(cycle, offset_in_cycle)`.
type CycleSlot = (usize, usize);

/// A bijection over `0..alphabet.size()` stored as disjoint cycles.
///
/// Indices that belong to no cycle are fixed points. A one-symbol group such
/// as `(S)` is accepted and behaves exactly like leaving `S` out; such groups
/// are not kept in [`cycles`](Self::cycles).
#[derive(Debug, Clone)]
pub struct Permutation {
    alphabet: Arc<Alphabet>,
    /// Disjoint cycles of length >= 2, in order of appearance.
    cycles: Vec<Vec<usize>>,
    /// Reverse lookup from index to its place in `cycles`; `None` for fixed points.
    slots: Vec<Option<CycleSlot>>,
}

impl Permutation {
    /// Parse `spec` as cycle notation over `alphabet`.
    ///
    /// Groups are parenthesized runs of symbols; whitespace is ignored
    /// everywhere. A symbol written outside any group is a fixed point.
    ///
    /// # Errors
    ///
    /// - [`CoreError::MalformedCycleSpec`] for nested or unmatched
    ///   parentheses, or a symbol listed more than once.
    /// - [`CoreError::UnknownSymbol`] for a symbol outside the alphabet.
    pub fn parse(spec: &str, alphabet: Arc<Alphabet>) -> Result<Self, CoreError> {
        let size = alphabet.size();
        let mut seen = vec![false; size];
        let mut cycles: Vec<Vec<usize>> = Vec::new();
        let mut open: Option<Vec<usize>> = None;

        for c in spec.chars() {
            match c {
                '(' => {
                    if open.is_some() {
                        return Err(CoreError::MalformedCycleSpec(format!(
                            "nested '(' in \"{spec}\""
                        )));
                    }
                    open = Some(Vec::new());
                }
                ')' => {
                    let cycle = open.take().ok_or_else(|| {
                        CoreError::MalformedCycleSpec(format!("unmatched ')' in \"{spec}\""))
                    })?;
                    if cycle.len() > 1 {
                        cycles.push(cycle);
                    }
                }
                c if c.is_whitespace() => {}
                c => {
                    let index = alphabet.to_index(c)?;
                    if seen[index] {
                        return Err(CoreError::MalformedCycleSpec(format!(
                            "symbol '{c}' appears more than once in \"{spec}\""
                        )));
                    }
                    seen[index] = true;
                    if let Some(cycle) = open.as_mut() {
                        cycle.push(index);
                    }
                }
            }
        }

        if open.is_some() {
            return Err(CoreError::MalformedCycleSpec(format!(
                "unclosed '(' in \"{spec}\""
            )));
        }

        let mut slots = vec![None; size];
        for (ci, cycle) in cycles.iter().enumerate() {
            for (pos, &index) in cycle.iter().enumerate() {
                slots[index] = Some((ci, pos));
            }
        }

        Ok(Self {
            alphabet,
            cycles,
            slots,
        })
    }

    /// The identity permutation over `alphabet`.
    pub fn identity(alphabet: Arc<Alphabet>) -> Self {
        let size = alphabet.size();
        Self {
            alphabet,
            cycles: Vec::new(),
            slots: vec![None; size],
        }
    }

    /// Size of the permuted alphabet.
    #[inline]
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// The alphabet this permutation was built against.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Non-trivial cycles as symbol indices.
    pub fn cycles(&self) -> &[Vec<usize>] {
        &self.cycles
    }

    /// Reduce `value` into `0..size` with floor modulo (never negative).
    #[inline]
    pub fn wrap(&self, value: isize) -> usize {
        value.rem_euclid(self.size() as isize) as usize
    }

    /// Apply the permutation to `index` (taken modulo the alphabet size).
    pub fn permute(&self, index: usize) -> usize {
        let index = index % self.size();
        match self.slots[index] {
            Some((ci, pos)) => {
                let cycle = &self.cycles[ci];
                cycle[(pos + 1) % cycle.len()]
            }
            None => index,
        }
    }

    /// Apply the inverse permutation to `index` (taken modulo the alphabet size).
    pub fn invert(&self, index: usize) -> usize {
        let index = index % self.size();
        match self.slots[index] {
            Some((ci, pos)) => {
                let cycle = &self.cycles[ci];
                cycle[(pos + cycle.len() - 1) % cycle.len()]
            }
            None => index,
        }
    }

    /// Apply the permutation to a symbol.
    pub fn permute_symbol(&self, symbol: char) -> Result<char, CoreError> {
        let index = self.alphabet.to_index(symbol)?;
        self.alphabet.to_symbol(self.permute(index))
    }

    /// Apply the inverse permutation to a symbol.
    pub fn invert_symbol(&self, symbol: char) -> Result<char, CoreError> {
        let index = self.alphabet.to_index(symbol)?;
        self.alphabet.to_symbol(self.invert(index))
    }

    /// Returns `true` iff no index maps to itself.
    pub fn derangement(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

impl fmt::Display for Permutation {
    /// Normalized cycle notation: fixed points omitted, groups space-separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = self.alphabet.symbols();
        for (ci, cycle) in self.cycles.iter().enumerate() {
            if ci > 0 {
                f.write_str(" ")?;
            }
            f.write_str("(")?;
            for &index in cycle {
                write!(f, "{}", symbols[index])?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

//! Boolean function representations: SOP covers, canonical truth
//! tables, threshold functions and threshold-gate networks.

use std::fmt;
use super::*;
use blifparse::{BlifRow, BlifTlg};

/// Upper bound on `.names` arity. Extraction materializes all `2^k`
/// assignments, so wider blocks are rejected instead of expanded.
pub const MAX_NAMES_ARITY: usize = 16;

/// Function extraction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    /// two cover rows assign different outputs to one assignment.
    /// `row_a`/`row_b` are 0-based row indices within the cover.
    ConflictingCoverRow { row_a: usize, row_b: usize, minterm: usize },
    /// the block is wider than [MAX_NAMES_ARITY].
    ArityTooLarge { arity: usize },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ExtractError::*;
        match self {
            ConflictingCoverRow { row_a, row_b, minterm } => write!(
                f, "cover rows {} and {} conflict on input assignment {:#b}",
                row_a, row_b, minterm),
            ArityTooLarge { arity } => write!(
                f, "block has {} inputs, the supported maximum is {}",
                arity, MAX_NAMES_ARITY)
        }
    }
}

/// A sum-of-products cover: the rows of a `.names` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cover {
    pub rows: Vec<BlifRow>,
}

#[inline]
fn row_matches(mask: &str, idx: usize) -> bool {
    mask.bytes().enumerate().all(|(i, c)| match c {
        b'-' => true,
        b'1' => idx >> i & 1 == 1,
        b'0' => idx >> i & 1 == 0,
        _ => unreachable!()
    })
}

impl Cover {
    /// Expand the cover into a canonical truth table of the given
    /// arity. Don't-care symbols expand to all matching assignments.
    ///
    /// An all-`1`-output cover lists the on-set (unlisted assignments
    /// are 0); an all-`0`-output cover lists the off-set. An empty
    /// cover is constant 0, matching `.names` with no rows. Covers
    /// mixing both output symbols are checked assignment by
    /// assignment for conflicts.
    pub fn to_table(&self, num_inputs: usize) -> Result<TruthTable, ExtractError> {
        if num_inputs > MAX_NAMES_ARITY {
            return Err(ExtractError::ArityTooLarge { arity: num_inputs })
        }
        let default = !self.rows.is_empty() &&
            self.rows.iter().all(|r| !r.output);
        let mut table = TruthTable::new_filled(num_inputs, default);
        let mut assigned: Vec<Option<usize>> = vec![None; 1 << num_inputs];
        for (ri, row) in self.rows.iter().enumerate() {
            debug_assert_eq!(row.mask.len(), num_inputs);
            for idx in 0..1usize << num_inputs {
                if !row_matches(&row.mask, idx) { continue }
                if let Some(prev) = assigned[idx] {
                    if self.rows[prev].output != row.output {
                        return Err(ExtractError::ConflictingCoverRow {
                            row_a: prev, row_b: ri, minterm: idx
                        })
                    }
                    continue;
                }
                assigned[idx] = Some(ri);
                table.set(idx, row.output);
            }
        }
        Ok(table)
    }
}

/// A canonical truth table over `k` inputs: `2^k` bits packed into
/// u64 words, indexed by input-bit assignment. Bit `i` of the index
/// is the value of input `i`.
#[derive(Clone, PartialEq, Eq)]
pub struct TruthTable {
    num_inputs: usize,
    words: Vec<u64>,
}

impl TruthTable {
    #[inline]
    fn num_words(num_inputs: usize) -> usize {
        ((1usize << num_inputs) + 63) / 64
    }

    /// a table with every entry set to `value`.
    pub fn new_filled(num_inputs: usize, value: bool) -> TruthTable {
        let mut t = TruthTable {
            num_inputs,
            words: vec![if value { !0u64 } else { 0 };
                        Self::num_words(num_inputs)]
        };
        if value {
            // keep the bits beyond 2^k zero so Eq stays bitwise.
            let tail = (1usize << num_inputs) % 64;
            if tail != 0 {
                *t.words.last_mut().unwrap() &= (1u64 << tail) - 1;
            }
        }
        t
    }

    /// build a table by evaluating `f` on every assignment.
    pub fn from_fn(num_inputs: usize, f: impl Fn(usize) -> bool) -> TruthTable {
        let mut t = TruthTable::new_filled(num_inputs, false);
        for idx in 0..1usize << num_inputs {
            if f(idx) {
                t.set(idx, true);
            }
        }
        t
    }

    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// number of entries, `2^k`.
    #[inline]
    pub fn len(&self) -> usize {
        1usize << self.num_inputs
    }

    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        self.words[idx / 64] >> (idx % 64) & 1 == 1
    }

    #[inline]
    pub fn set(&mut self, idx: usize, value: bool) {
        let mask = 1u64 << (idx % 64);
        match value {
            true => self.words[idx / 64] |= mask,
            false => self.words[idx / 64] &= !mask
        }
    }

    /// does the output ever depend on input `var`?
    pub fn depends_on(&self, var: usize) -> bool {
        self.unateness(var) != Unateness::Independent
    }

    /// classify the function's behavior in input `var`.
    pub fn unateness(&self, var: usize) -> Unateness {
        let (mut pos, mut neg) = (false, false);
        for idx in 0..self.len() {
            if idx >> var & 1 == 1 { continue }
            let f0 = self.get(idx);
            let f1 = self.get(idx | 1 << var);
            if f0 == f1 { continue }
            match f1 {
                true => pos = true,
                false => neg = true
            }
        }
        match (pos, neg) {
            (false, false) => Unateness::Independent,
            (true, false) => Unateness::Positive,
            (false, true) => Unateness::Negative,
            (true, true) => Unateness::Binate
        }
    }

    /// Shannon cofactor: fix `var` to `value`. The result has arity
    /// `k - 1`; remaining inputs keep their relative order.
    pub fn cofactor(&self, var: usize, value: bool) -> TruthTable {
        let low_mask = (1usize << var) - 1;
        TruthTable::from_fn(self.num_inputs - 1, |idx| {
            let full = (idx & low_mask)
                | (usize::from(value) << var)
                | ((idx & !low_mask) << 1);
            self.get(full)
        })
    }

    /// project the table onto the given input positions; every input
    /// outside `vars` must be one the function does not depend on.
    pub fn project(&self, vars: &[usize]) -> TruthTable {
        TruthTable::from_fn(vars.len(), |idx| {
            let full = vars.iter().enumerate()
                .map(|(i, &v)| (idx >> i & 1) << v)
                .sum::<usize>();
            self.get(full)
        })
    }
}

impl fmt::Debug for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TruthTable({}; ", self.num_inputs)?;
        for idx in 0..self.len() {
            write!(f, "{}", self.get(idx) as u8)?;
        }
        write!(f, ")")
    }
}

/// Unateness of a function in one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unateness {
    /// output never depends on the input.
    Independent,
    Positive,
    Negative,
    /// both polarities observed. a binate function is never a single
    /// threshold gate.
    Binate,
}

/// A threshold function: output is 1 iff the weighted sum of the
/// 0/1 inputs reaches the threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdFn {
    /// one signed weight per input.
    pub weights: Vec<i64>,
    pub threshold: i64,
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl ThresholdFn {
    #[inline]
    pub fn arity(&self) -> usize {
        self.weights.len()
    }

    /// evaluate on an input-bit assignment.
    #[inline]
    pub fn eval(&self, idx: usize) -> bool {
        let sum: i64 = self.weights.iter().enumerate()
            .filter(|(i, _)| idx >> i & 1 == 1)
            .map(|(_, w)| w)
            .sum();
        sum >= self.threshold
    }

    pub fn to_table(&self) -> TruthTable {
        TruthTable::from_fn(self.arity(), |idx| self.eval(idx))
    }

    /// scale to the smallest integer representation: divide the
    /// weights and threshold by their common divisor.
    pub fn normalize(&mut self) {
        let g = self.weights.iter()
            .fold(self.threshold.unsigned_abs(),
                  |g, w| gcd(g, w.unsigned_abs()));
        if g > 1 {
            for w in &mut self.weights {
                *w /= g as i64;
            }
            self.threshold /= g as i64;
        }
    }
}

impl From<BlifTlg> for ThresholdFn {
    fn from(t: BlifTlg) -> ThresholdFn {
        ThresholdFn { weights: t.weights, threshold: t.threshold }
    }
}

impl From<&ThresholdFn> for BlifTlg {
    fn from(t: &ThresholdFn) -> BlifTlg {
        BlifTlg { weights: t.weights.clone(), threshold: t.threshold }
    }
}

/// Operand of a threshold network node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlgOperand {
    /// the i-th input of the realized function.
    Input(usize),
    /// the output of an earlier node in the same network.
    Node(usize),
}

/// One threshold gate inside a network. Weights align with operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlgNode {
    pub operands: Vec<TlgOperand>,
    pub func: ThresholdFn,
}

/// A network of threshold gates realizing one Boolean function.
/// Nodes are topologically ordered; a [TlgOperand::Node] reference
/// always points at an earlier node. The last node drives the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlgNetwork {
    pub nodes: Vec<TlgNode>,
}

impl TlgNetwork {
    /// a network of one gate wired straight to the function inputs.
    pub fn single(func: ThresholdFn) -> TlgNetwork {
        TlgNetwork {
            nodes: vec![TlgNode {
                operands: (0..func.arity()).map(TlgOperand::Input).collect(),
                func
            }]
        }
    }

    /// evaluate the network on an input-bit assignment.
    pub fn eval(&self, idx: usize) -> bool {
        let mut vals: Vec<bool> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let sum: i64 = node.operands.iter()
                .zip(&node.func.weights)
                .filter(|(op, _)| match op {
                    TlgOperand::Input(i) => idx >> i & 1 == 1,
                    TlgOperand::Node(j) => vals[*j]
                })
                .map(|(_, w)| w)
                .sum();
            vals.push(sum >= node.func.threshold);
        }
        *vals.last().unwrap()
    }

    pub fn to_table(&self, num_inputs: usize) -> TruthTable {
        TruthTable::from_fn(num_inputs, |idx| self.eval(idx))
    }
}

impl NetlistDB {
    /// Derive the canonical truth table of a gate from whichever
    /// function representation it carries.
    pub fn gate_table(&self, gateid: usize) -> Result<TruthTable, ExtractError> {
        let gate = &self.gates[gateid];
        match &gate.func {
            GateFunc::Cover(c) => c.to_table(gate.inputs.len()),
            GateFunc::Table(t) => Ok(t.clone()),
            GateFunc::Threshold(t) => Ok(t.to_table())
        }
    }
}

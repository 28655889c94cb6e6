//! A flattened gate-level netlist database for BLIF circuits.

use std::collections::HashMap;
use compact_str::CompactString;

/// what drives a net.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetDriver {
    /// a primary input.
    Pi,
    /// the gate with this index.
    Gate(usize),
    /// nothing. only legal transiently during construction;
    /// a finished database has no undriven nets.
    Undriven,
}

mod csr;
pub use csr::VecCSR;

mod func;
pub use func::{
    Cover, TruthTable, ThresholdFn, Unateness,
    TlgNetwork, TlgNode, TlgOperand,
    ExtractError, MAX_NAMES_ARITY
};

/// A logic element: ordered input nets, one output net, and a
/// function over the inputs.
#[derive(Debug, Clone)]
pub struct Gate {
    /// Input net indices. Bit `i` of a truth-table assignment is the
    /// value of `inputs[i]`.
    pub inputs: Vec<usize>,
    /// Output net index.
    pub output: usize,
    pub func: GateFunc,
}

/// Function representation of a gate.
#[derive(Debug, Clone)]
pub enum GateFunc {
    /// sum-of-products cover, as parsed from `.names` rows.
    Cover(Cover),
    /// canonical truth table.
    Table(TruthTable),
    /// threshold gate parameters.
    Threshold(ThresholdFn),
}

impl GateFunc {
    /// arity of this function representation, if it encodes one.
    /// covers do not: their arity comes from the gate input count.
    #[inline]
    pub fn arity(&self) -> Option<usize> {
        match self {
            GateFunc::Cover(_) => None,
            GateFunc::Table(t) => Some(t.num_inputs()),
            GateFunc::Threshold(t) => Some(t.arity())
        }
    }
}

/// The netlist storage.
///
/// The public members are all READ-ONLY outside. Databases are
/// created by [NetlistDB::from_blif] and derived through
/// [NetlistDB::rebuild_with_networks]; they are never patched
/// in place.
#[readonly::make]
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct NetlistDB {
    /// model name.
    pub name: CompactString,
    /// number of nets/wires.
    pub num_nets: usize,
    /// number of gates.
    pub num_gates: usize,

    /// Net name to index.
    pub netname2id: HashMap<CompactString, usize>,
    /// Net index to name.
    pub netnames: Vec<CompactString>,

    /// Primary input net indices, in declaration order.
    pub inputs: Vec<usize>,
    /// Primary output net indices, in declaration order.
    pub outputs: Vec<usize>,

    /// Gates, in declaration order.
    pub gates: Vec<Gate>,

    /// Net index to its driver.
    pub net2driver: Vec<NetDriver>,
    /// Net to reader gates CSR. A gate reading the same net through
    /// several pins appears once per pin.
    pub net2fanout: VecCSR,

    /// Gate indices in topological order: a gate appears after every
    /// gate whose output it reads.
    pub topo_order: Vec<usize>,
}

mod builder;
pub use builder::{BuildError, NetlistError};

mod rebuild;
pub use rebuild::NameAlloc;

mod blifout;

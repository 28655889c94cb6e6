//! Rebuilding a netlist with per-gate threshold realizations.

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fresh net name allocator: an atomically incremented counter with
/// a suffix scheme, retried on collision with existing names. Safe
/// to share across synthesis workers.
pub struct NameAlloc {
    counter: AtomicUsize,
}

impl NameAlloc {
    pub fn new() -> NameAlloc {
        NameAlloc { counter: AtomicUsize::new(0) }
    }

    /// next fresh name that does not collide with `taken`.
    pub fn fresh(&self, taken: &HashMap<CompactString, usize>) -> CompactString {
        loop {
            let c = self.counter.fetch_add(1, Ordering::Relaxed);
            let name = CompactString::from(format!("__tlg{}", c));
            if !taken.contains_key(&name) {
                return name
            }
        }
    }
}

impl Default for NameAlloc {
    fn default() -> NameAlloc {
        NameAlloc::new()
    }
}

impl NetlistDB {
    /// Build a new netlist with the same primary inputs/outputs
    /// (names and order) where gate `g` is replaced by the threshold
    /// network `networks[g]`. The final node of each network drives
    /// the original output net; internal nodes get fresh net names
    /// from `alloc`. The receiver is not mutated.
    pub fn rebuild_with_networks(
        &self, networks: &[TlgNetwork], alloc: &NameAlloc
    ) -> NetlistDB {
        assert_eq!(networks.len(), self.num_gates);

        let mut db = NetlistDB::empty(self.name.clone());
        db.num_nets = self.num_nets;
        db.netname2id = self.netname2id.clone();
        db.netnames = self.netnames.clone();
        db.net2driver = vec![NetDriver::Undriven; self.num_nets];
        db.inputs = self.inputs.clone();
        db.outputs = self.outputs.clone();
        for i in 0..db.inputs.len() {
            let pi = db.inputs[i];
            db.net2driver[pi] = NetDriver::Pi;
        }

        for (g, net) in networks.iter().enumerate() {
            let orig = &self.gates[g];
            let last = net.nodes.len() - 1;
            let mut node_nets: Vec<usize> = Vec::with_capacity(net.nodes.len());
            for (ni, node) in net.nodes.iter().enumerate() {
                let out = match ni == last {
                    true => orig.output,
                    false => {
                        let name = alloc.fresh(&db.netname2id);
                        let id = db.num_nets;
                        db.num_nets += 1;
                        db.netname2id.insert(name.clone(), id);
                        db.netnames.push(name);
                        db.net2driver.push(NetDriver::Undriven);
                        id
                    }
                };
                let inputs: Vec<usize> = node.operands.iter()
                    .map(|op| match op {
                        TlgOperand::Input(i) => orig.inputs[*i],
                        TlgOperand::Node(j) => node_nets[*j]
                    })
                    .collect();
                db.net2driver[out] = NetDriver::Gate(db.gates.len());
                db.gates.push(Gate {
                    inputs, output: out,
                    func: GateFunc::Threshold(node.func.clone())
                });
                node_nets.push(out);
            }
        }
        db.num_gates = db.gates.len();

        db.finalize_graph()
            .expect("threshold realizations must keep the netlist acyclic");
        db
    }
}

//! Serializing a netlist database back to a printable BLIF object.

use super::*;
use blifparse::{Blif, BlifModel, BlifNames, BlifRow};

/// expand a truth table into canonical on-set rows.
fn table_rows(t: &TruthTable) -> Vec<BlifRow> {
    (0..t.len())
        .filter(|&idx| t.get(idx))
        .map(|idx| BlifRow {
            mask: (0..t.num_inputs())
                .map(|i| match idx >> i & 1 { 1 => '1', _ => '0' })
                .collect(),
            output: true,
        })
        .collect()
}

impl NetlistDB {
    fn gate_to_names(&self, gate: &Gate) -> BlifNames {
        let ionets: Vec<CompactString> = gate.inputs.iter()
            .chain(std::iter::once(&gate.output))
            .map(|&n| self.netnames[n].clone())
            .collect();
        // threshold gates fall back to expanded truth-table rows so
        // any BLIF consumer can read the file; the annotation keeps
        // the weights/threshold for re-parsing by this tool.
        let (rows, tlg) = match &gate.func {
            GateFunc::Cover(c) => (c.rows.clone(), None),
            GateFunc::Table(t) => (table_rows(t), None),
            GateFunc::Threshold(t) => (table_rows(&t.to_table()),
                                       Some(t.into()))
        };
        BlifNames { line: 0, ionets, rows, tlg }
    }

    /// Serialize into a printable BLIF object. Primary input/output
    /// names and order, net names and gate declaration order are
    /// all preserved.
    pub fn to_blif(&self) -> Blif {
        let model = BlifModel {
            line: 0,
            inputs: self.inputs.iter()
                .map(|&n| self.netnames[n].clone()).collect(),
            outputs: self.outputs.iter()
                .map(|&n| self.netnames[n].clone()).collect(),
            names: self.gates.iter()
                .map(|gate| self.gate_to_names(gate)).collect(),
        };
        Blif { models: vec![(self.name.clone(), model)] }
    }
}

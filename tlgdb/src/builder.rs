use super::*;
use std::fmt;
use std::collections::VecDeque;
use blifparse::{Blif, BlifModel, ParseError};

/// Semantic failures while turning a parsed BLIF model into a
/// netlist database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// the file contains no model at all.
    NoModel,
    /// the requested model name is absent.
    ModelNotFound { name: String },
    /// a net is consumed (gate input or primary output) but driven
    /// by neither a primary input nor a gate.
    UndeclaredNet { net: CompactString, line: usize },
    /// a net is driven more than once (two `.names` outputs, or a
    /// `.names` output onto a primary input).
    DuplicateOutputDriver { net: CompactString, line: usize },
    /// the gate dependency graph has a cycle through this net.
    CombinationalLoop { net: CompactString },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BuildError::*;
        match self {
            NoModel => write!(f, "no model in BLIF input"),
            ModelNotFound { name } => write!(
                f, "model `{}` not found in BLIF input", name),
            UndeclaredNet { net, line } => write!(
                f, "net `{}` referenced at line {} has no driver \
                    and is not a primary input", net, line),
            DuplicateOutputDriver { net, line } => write!(
                f, "net `{}` is driven again at line {}", net, line),
            CombinationalLoop { net } => write!(
                f, "combinational loop through net `{}`", net)
        }
    }
}

/// Either a parse error or a build error, for the read-and-build
/// shortcut constructors.
#[derive(Debug, Clone)]
pub enum NetlistError {
    Parse(ParseError),
    Build(BuildError),
}

impl fmt::Display for NetlistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetlistError::Parse(e) => write!(f, "{}", e),
            NetlistError::Build(e) => write!(f, "{}", e)
        }
    }
}

impl From<ParseError> for NetlistError {
    fn from(e: ParseError) -> NetlistError { NetlistError::Parse(e) }
}

impl From<BuildError> for NetlistError {
    fn from(e: BuildError) -> NetlistError { NetlistError::Build(e) }
}

/// Pick the model to build: the named one if requested, the first
/// one otherwise (the first model of a BLIF file is the main one).
fn select_model(
    blif: Blif, top: Option<&str>
) -> Option<(CompactString, BlifModel)> {
    let num_models = blif.models.len();
    match top {
        Some(top) => blif.models.into_iter().find(|(name, _)| name == top),
        None => {
            let first = blif.models.into_iter().next()?;
            if num_models > 1 {
                clilog::info!(
                    TLG_BLIF_MULTI,
                    "BLIF input has {} models, converting the first \
                     one (`{}`)", num_models, first.0);
            }
            Some(first)
        }
    }
}

impl NetlistDB {
    /// Get or insert a net by name. New nets start undriven;
    /// `first_ref_lines` records the line that first referenced each
    /// net, for diagnostics.
    #[inline]
    fn get_or_insert_net(
        &mut self, name: &CompactString,
        line: usize, first_ref_lines: &mut Vec<usize>
    ) -> usize {
        if let Some(i) = self.netname2id.get(name) {
            return *i
        }
        let id = self.num_nets;
        self.num_nets += 1;
        self.netname2id.insert(name.clone(), id);
        self.netnames.push(name.clone());
        self.net2driver.push(NetDriver::Undriven);
        first_ref_lines.push(line);
        id
    }

    pub(crate) fn empty(name: CompactString) -> NetlistDB {
        NetlistDB {
            name,
            num_nets: 0,
            num_gates: 0,
            netname2id: HashMap::new(),
            netnames: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            gates: Vec::new(),
            net2driver: Vec::new(),
            net2fanout: Default::default(),
            topo_order: Vec::new(),
        }
    }

    /// Finalize the graph structure: fan-out CSR and topological
    /// order. Fails on a combinational cycle.
    #[must_use]
    pub(crate) fn finalize_graph(&mut self) -> Result<(), BuildError> {
        let pairs: Vec<(usize, usize)> = self.gates.iter()
            .enumerate()
            .flat_map(|(g, gate)| gate.inputs.iter().map(move |&n| (n, g)))
            .collect();
        self.net2fanout = VecCSR::from_pairs(self.num_nets, &pairs);

        // Kahn's algorithm over the gate graph. gates become ready in
        // ascending index order, keeping the order reproducible.
        let mut indeg = vec![0usize; self.num_gates];
        for (g, gate) in self.gates.iter().enumerate() {
            for &n in &gate.inputs {
                if let NetDriver::Gate(_) = self.net2driver[n] {
                    indeg[g] += 1;
                }
            }
        }
        let mut queue: VecDeque<usize> = (0..self.num_gates)
            .filter(|&g| indeg[g] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.num_gates);
        while let Some(g) = queue.pop_front() {
            order.push(g);
            for reader in self.net2fanout.iter_set(self.gates[g].output) {
                indeg[reader] -= 1;
                if indeg[reader] == 0 {
                    queue.push_back(reader);
                }
            }
        }
        if order.len() != self.num_gates {
            let g = (0..self.num_gates).find(|&g| indeg[g] > 0).unwrap();
            return Err(BuildError::CombinationalLoop {
                net: self.netnames[self.gates[g].output].clone()
            })
        }
        self.topo_order = order;
        Ok(())
    }

    /// Build a database from a parsed BLIF object.
    ///
    /// The model to be built can be optionally specified through the
    /// `top` parameter; the first model of the file is used otherwise.
    pub fn from_blif(
        blif: Blif, top: Option<&str>
    ) -> Result<NetlistDB, BuildError> {
        let (name, m) = match select_model(blif, top) {
            Some(x) => x,
            None => return Err(match top {
                Some(t) => BuildError::ModelNotFound { name: t.to_string() },
                None => BuildError::NoModel
            })
        };

        let time_build = clilog::stimer!("build_netlistdb");
        let mut db = NetlistDB::empty(name);
        let mut first_ref = Vec::new();

        for pi in &m.inputs {
            let id = db.get_or_insert_net(pi, m.line, &mut first_ref);
            if db.net2driver[id] != NetDriver::Undriven {
                return Err(BuildError::DuplicateOutputDriver {
                    net: pi.clone(), line: m.line
                })
            }
            db.net2driver[id] = NetDriver::Pi;
            db.inputs.push(id);
        }

        for block in &m.names {
            let inputs: Vec<usize> = block.input_nets().iter()
                .map(|n| db.get_or_insert_net(n, block.line, &mut first_ref))
                .collect();
            let out = db.get_or_insert_net(
                block.output_net(), block.line, &mut first_ref);
            if db.net2driver[out] != NetDriver::Undriven {
                return Err(BuildError::DuplicateOutputDriver {
                    net: block.output_net().clone(), line: block.line
                })
            }
            db.net2driver[out] = NetDriver::Gate(db.gates.len());
            let func = match &block.tlg {
                Some(t) => GateFunc::Threshold(t.clone().into()),
                None => GateFunc::Cover(Cover { rows: block.rows.clone() })
            };
            db.gates.push(Gate { inputs, output: out, func });
        }
        db.num_gates = db.gates.len();

        for po in &m.outputs {
            let id = db.get_or_insert_net(po, m.line, &mut first_ref);
            db.outputs.push(id);
        }

        // nets with zero drivers must have been primary inputs.
        for id in 0..db.num_nets {
            if db.net2driver[id] == NetDriver::Undriven {
                return Err(BuildError::UndeclaredNet {
                    net: db.netnames[id].clone(),
                    line: first_ref[id]
                })
            }
        }

        db.finalize_graph()?;
        clilog::finish!(time_build);
        Ok(db)
    }

    /// Convenient shortcut to parse and build from a source string.
    pub fn from_blif_source(
        source: &str, top: Option<&str>
    ) -> Result<NetlistDB, NetlistError> {
        let blif = Blif::parse_str(source)?;
        Ok(NetlistDB::from_blif(blif, top)?)
    }

    /// Convenient shortcut to parse and build from a file.
    pub fn from_blif_file(
        path: impl AsRef<std::path::Path>, top: Option<&str>
    ) -> Result<NetlistDB, NetlistError> {
        let blif = Blif::parse_file(&path)?;
        Ok(NetlistDB::from_blif(blif, top)?)
    }
}

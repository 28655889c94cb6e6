//! Threshold-logic synthesis of Boolean functions.
//!
//! A function is realized as a single threshold gate when a bounded
//! weight-training search proves it linearly separable, and as a
//! Shannon-decomposed network of threshold gates otherwise.

use tlgdb::{
    ThresholdFn, TlgNetwork, TlgNode, TlgOperand, TruthTable, Unateness
};

/// Synthesis tuning knobs.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// bound on full passes of the iterative weight-training loop in
    /// the separability test. when exhausted, the function falls
    /// through to decomposition.
    pub max_training_rounds: usize,
}

impl Default for SynthConfig {
    fn default() -> SynthConfig {
        SynthConfig { max_training_rounds: 256 }
    }
}

/// Synthesize a truth table into an equivalent threshold-gate
/// network. Deterministic: identical tables give identical networks.
pub fn synthesize(table: &TruthTable, config: &SynthConfig) -> TlgNetwork {
    let net = synth_support_reduced(table, config);
    debug_assert!(
        net.to_table(table.num_inputs()) == *table,
        "synthesized network is not equivalent to its source function");
    net
}

/// project away the inputs the function does not depend on, then
/// remap the reduced network back onto the original input positions.
fn synth_support_reduced(
    table: &TruthTable, config: &SynthConfig
) -> TlgNetwork {
    let k = table.num_inputs();
    let support: Vec<usize> = (0..k)
        .filter(|&v| table.depends_on(v))
        .collect();
    if support.len() == k {
        return synth_full_support(table, config)
    }
    let mut net = synth_full_support(&table.project(&support), config);
    for node in &mut net.nodes {
        for op in &mut node.operands {
            if let TlgOperand::Input(i) = op {
                *op = TlgOperand::Input(support[*i]);
            }
        }
    }
    net
}

fn synth_full_support(
    table: &TruthTable, config: &SynthConfig
) -> TlgNetwork {
    let k = table.num_inputs();
    if k == 0 {
        // constants: an empty weighted sum against threshold 0 or 1.
        let threshold = match table.get(0) { true => 0, false => 1 };
        return TlgNetwork::single(ThresholdFn {
            weights: Vec::new(), threshold
        })
    }
    if let Some(func) = train_threshold(table, config) {
        return TlgNetwork::single(func)
    }
    // Shannon decomposition on the lowest-indexed binate input
    // (lowest-indexed input at all if training gave up on a unate
    // function). Cofactors have strictly smaller arity, so this
    // terminates.
    let var = (0..k)
        .find(|&v| table.unateness(v) == Unateness::Binate)
        .unwrap_or(0);
    let lo = synth_support_reduced(&table.cofactor(var, false), config);
    let hi = synth_support_reduced(&table.cofactor(var, true), config);
    combine_cofactors(var, lo, hi)
}

/// append a cofactor sub-network, shifting its node references and
/// remapping its input positions around the removed `var`.
fn append_remapped(
    nodes: &mut Vec<TlgNode>, sub: TlgNetwork, var: usize
) -> usize {
    let off = nodes.len();
    for mut node in sub.nodes {
        for op in &mut node.operands {
            *op = match *op {
                TlgOperand::Input(i) if i >= var => TlgOperand::Input(i + 1),
                TlgOperand::Input(i) => TlgOperand::Input(i),
                TlgOperand::Node(j) => TlgOperand::Node(j + off)
            };
        }
        nodes.push(node);
    }
    nodes.len() - 1
}

/// glue `out = (x & hi) | (!x & lo)` out of three 2-input threshold
/// gates. A plain multiplexer is binate in `x`, hence the AND/AND/OR
/// split.
fn combine_cofactors(
    var: usize, lo: TlgNetwork, hi: TlgNetwork
) -> TlgNetwork {
    let mut nodes = Vec::with_capacity(
        lo.nodes.len() + hi.nodes.len() + 3);
    let lo_out = append_remapped(&mut nodes, lo, var);
    let hi_out = append_remapped(&mut nodes, hi, var);
    let t_hi = nodes.len();
    nodes.push(TlgNode {
        operands: vec![TlgOperand::Input(var), TlgOperand::Node(hi_out)],
        func: ThresholdFn { weights: vec![1, 1], threshold: 2 },
    });
    let t_lo = nodes.len();
    nodes.push(TlgNode {
        operands: vec![TlgOperand::Input(var), TlgOperand::Node(lo_out)],
        func: ThresholdFn { weights: vec![-1, 1], threshold: 1 },
    });
    nodes.push(TlgNode {
        operands: vec![TlgOperand::Node(t_hi), TlgOperand::Node(t_lo)],
        func: ThresholdFn { weights: vec![1, 1], threshold: 1 },
    });
    TlgNetwork { nodes }
}

/// Linear separability test by the classical threshold-training
/// procedure: start at zero weights, nudge weights and threshold
/// toward each misclassified vector, accept after a clean full pass
/// over all `2^k` vectors.
///
/// Threshold functions are unate in every input, so binate functions
/// are rejected before any training. For unate functions the search
/// is cut off after `max_training_rounds` passes; the caller then
/// decomposes, which is always correct, merely less compact.
fn train_threshold(
    table: &TruthTable, config: &SynthConfig
) -> Option<ThresholdFn> {
    let k = table.num_inputs();
    for v in 0..k {
        if table.unateness(v) == Unateness::Binate {
            return None
        }
    }
    let mut func = ThresholdFn { weights: vec![0; k], threshold: 0 };
    for _ in 0..config.max_training_rounds {
        let mut stable = true;
        for idx in 0..table.len() {
            let want = table.get(idx);
            if func.eval(idx) == want { continue }
            stable = false;
            let delta = match want { true => 1, false => -1 };
            for i in 0..k {
                if idx >> i & 1 == 1 {
                    func.weights[i] += delta;
                }
            }
            func.threshold -= delta;
        }
        if stable {
            func.normalize();
            return Some(func)
        }
    }
    clilog::debug!(TLG_TRAIN_BOUND,
                   "weight training hit the {}-round bound on a unate \
                    function of {} inputs, decomposing",
                   config.max_training_rounds, k);
    None
}

//! tests for the threshold synthesizer core.

use tlgsyn::*;
use tlgdb::*;

fn tt(k: usize, bits: &str) -> TruthTable {
    assert_eq!(bits.len(), 1 << k);
    TruthTable::from_fn(k, |idx| bits.as_bytes()[idx] == b'1')
}

fn check(table: &TruthTable) -> TlgNetwork {
    let net = synthesize(table, &SynthConfig::default());
    assert_eq!(net.to_table(table.num_inputs()), *table,
               "network not equivalent for {table:?}");
    net
}

#[test]
fn and2_is_one_gate() {
    clilog::init_stdout_simple_trace();
    let net = check(&tt(2, "0001"));
    assert_eq!(net.nodes.len(), 1);
}

#[test]
fn or2_is_one_gate() {
    let net = check(&tt(2, "0111"));
    assert_eq!(net.nodes.len(), 1);
}

#[test]
fn maj3_is_one_gate() {
    let net = check(&tt(3, "00010111"));
    assert_eq!(net.nodes.len(), 1);
}

#[test]
fn xor2_decomposes() {
    let net = check(&tt(2, "0110"));
    assert!(net.nodes.len() >= 2, "xor is not linearly separable");
}

#[test]
fn base_cases() {
    let net = check(&tt(0, "1"));
    assert_eq!(net.nodes.len(), 1);
    assert!(net.nodes[0].func.weights.is_empty());
    check(&tt(0, "0"));
    // identity and negation.
    check(&tt(1, "01"));
    check(&tt(1, "10"));
}

#[test]
fn support_reduction() {
    // f = c, regardless of a and b.
    let table = TruthTable::from_fn(3, |idx| idx >> 2 & 1 == 1);
    let net = check(&table);
    assert_eq!(net.nodes.len(), 1);
    assert_eq!(net.nodes[0].operands, vec![TlgOperand::Input(2)]);
}

#[test]
fn exhaustive_arity2() {
    // all 16 functions of 2 inputs; everything except xor/xnor is a
    // threshold function and must come out as a single gate.
    for f in 0u32..16 {
        let table = TruthTable::from_fn(2, |idx| f >> idx & 1 == 1);
        let net = check(&table);
        match f {
            0b0110 | 0b1001 => assert!(net.nodes.len() > 1),
            _ => assert_eq!(net.nodes.len(), 1, "function {f:#06b}")
        }
    }
}

#[test]
fn exhaustive_arity3() {
    for f in 0u32..256 {
        let table = TruthTable::from_fn(3, |idx| f >> idx & 1 == 1);
        check(&table);
    }
}

#[test]
fn arity6_spot_checks() {
    // fixed dense bit patterns standing in for irregular functions.
    for seed in [0x9e3779b97f4a7c15u64, 0x243f6a8885a308d3,
                 0xdeadbeefcafef00d, 0x0123456789abcdef] {
        let table = TruthTable::from_fn(6, |idx| seed >> idx & 1 == 1);
        check(&table);
    }
}

#[test]
fn parity8_terminates() {
    // parity is binate in every input: worst case for decomposition.
    let table = TruthTable::from_fn(8, |idx| idx.count_ones() % 2 == 1);
    let net = check(&table);
    assert!(net.nodes.len() > 1);
}

#[test]
fn deterministic_networks() {
    let table = tt(3, "01101001");
    let a = synthesize(&table, &SynthConfig::default());
    let b = synthesize(&table, &SynthConfig::default());
    assert_eq!(a, b);
}

#[test]
fn tight_training_bound_still_correct() {
    // with a bound of a single round, almost nothing converges and
    // everything decomposes; results must stay equivalent.
    let config = SynthConfig { max_training_rounds: 1 };
    for f in 0u32..256 {
        let table = TruthTable::from_fn(3, |idx| f >> idx & 1 == 1);
        let net = synthesize(&table, &config);
        assert_eq!(net.to_table(3), table);
    }
}

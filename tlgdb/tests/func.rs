//! tests for function extraction and threshold representations.

use tlgdb::*;
use blifparse::BlifRow;

fn cover(rows: &[(&str, bool)]) -> Cover {
    Cover {
        rows: rows.iter().map(|(m, o)| BlifRow {
            mask: (*m).into(), output: *o
        }).collect()
    }
}

#[test]
fn extract_and2() {
    let t = cover(&[("11", true)]).to_table(2).unwrap();
    assert_eq!(format!("{t:?}"), "TruthTable(2; 0001)");
}

#[test]
fn extract_dont_care() {
    // f = a | b as two rows with don't cares.
    let t = cover(&[("1-", true), ("-1", true)]).to_table(2).unwrap();
    assert_eq!(format!("{t:?}"), "TruthTable(2; 0111)");
}

#[test]
fn extract_offset_cover() {
    // all-0-output rows list the off-set: f = !(a & b).
    let t = cover(&[("11", false)]).to_table(2).unwrap();
    assert_eq!(format!("{t:?}"), "TruthTable(2; 1110)");
}

#[test]
fn extract_constants() {
    let t = cover(&[]).to_table(0).unwrap();
    assert_eq!(t.get(0), false);
    let t = cover(&[("", true)]).to_table(0).unwrap();
    assert_eq!(t.get(0), true);
}

#[test]
fn extract_conflict() {
    // rows overlap on a=1,b=1 with different outputs.
    let e = cover(&[("1-", true), ("-1", false)]).to_table(2).unwrap_err();
    assert_eq!(e, ExtractError::ConflictingCoverRow {
        row_a: 0, row_b: 1, minterm: 0b11
    });
    println!("error display: {e}");
}

#[test]
fn extract_arity_cap() {
    let e = cover(&[]).to_table(MAX_NAMES_ARITY + 1).unwrap_err();
    assert!(matches!(e, ExtractError::ArityTooLarge { .. }));
}

#[test]
fn unateness_classification() {
    let and2 = cover(&[("11", true)]).to_table(2).unwrap();
    assert_eq!(and2.unateness(0), Unateness::Positive);
    let xor2 = cover(&[("10", true), ("01", true)]).to_table(2).unwrap();
    assert_eq!(xor2.unateness(0), Unateness::Binate);
    assert_eq!(xor2.unateness(1), Unateness::Binate);
    // f = !a
    let nota = cover(&[("0-", true)]).to_table(2).unwrap();
    assert_eq!(nota.unateness(0), Unateness::Negative);
    assert_eq!(nota.unateness(1), Unateness::Independent);
    assert!(!nota.depends_on(1));
}

#[test]
fn cofactor_and_project() {
    let xor2 = cover(&[("10", true), ("01", true)]).to_table(2).unwrap();
    // fixing a=1 leaves !b; a=0 leaves b.
    assert_eq!(format!("{:?}", xor2.cofactor(0, true)),
               "TruthTable(1; 10)");
    assert_eq!(format!("{:?}", xor2.cofactor(0, false)),
               "TruthTable(1; 01)");

    let nota = cover(&[("0-", true)]).to_table(2).unwrap();
    assert_eq!(format!("{:?}", nota.project(&[0])),
               "TruthTable(1; 10)");
}

#[test]
fn threshold_eval_and_normalize() {
    let mut maj3 = ThresholdFn {
        weights: vec![2, 2, 2], threshold: 4
    };
    maj3.normalize();
    assert_eq!(maj3, ThresholdFn { weights: vec![1, 1, 1], threshold: 2 });
    assert_eq!(format!("{:?}", maj3.to_table()),
               "TruthTable(3; 00010111)");
}

#[test]
fn network_eval() {
    // xor as (a & !b) | (!a & b), three glue-style gates plus the
    // two literals folded into weights.
    let net = TlgNetwork {
        nodes: vec![
            TlgNode {
                operands: vec![TlgOperand::Input(0), TlgOperand::Input(1)],
                func: ThresholdFn { weights: vec![1, -1], threshold: 1 },
            },
            TlgNode {
                operands: vec![TlgOperand::Input(0), TlgOperand::Input(1)],
                func: ThresholdFn { weights: vec![-1, 1], threshold: 1 },
            },
            TlgNode {
                operands: vec![TlgOperand::Node(0), TlgOperand::Node(1)],
                func: ThresholdFn { weights: vec![1, 1], threshold: 1 },
            },
        ]
    };
    assert_eq!(format!("{:?}", net.to_table(2)), "TruthTable(2; 0110)");
}

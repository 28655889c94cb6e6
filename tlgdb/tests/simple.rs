use tlgdb::*;
use itertools::Itertools;

const BLIF_SIMPLE: &str = "\
.model simple
.inputs a b c
.outputs f
.names a b n1
11 1
.names n1 c f
10 1
01 1
.end
";

#[test]
fn simple() {
    clilog::init_stdout_simple_trace();

    let db: NetlistDB = NetlistDB::from_blif_source(
        BLIF_SIMPLE, None
    ).unwrap();

    println!("The database: {db:#?}");
    assert_eq!(db.name, "simple");
    assert_eq!(db.num_nets, 5);
    assert_eq!(db.num_gates, 2);
    // nets are created in reference order: a b c, then n1, then f.
    assert_eq!(format!("{}", db.netnames.iter().format(", ")),
               "a, b, c, n1, f");
    assert_eq!(db.inputs, vec![0, 1, 2]);
    assert_eq!(db.outputs, vec![4]);
    use NetDriver::*;
    assert_eq!(db.net2driver, vec![Pi, Pi, Pi, Gate(0), Gate(1)]);
    assert_eq!(db.net2fanout.start, vec![0, 1, 2, 3, 4, 4]);
    assert_eq!(db.net2fanout.items, vec![0, 0, 1, 1]);
    assert_eq!(db.topo_order, vec![0, 1]);

    assert_eq!(db.gates[0].inputs, vec![0, 1]);
    assert_eq!(db.gates[0].output, 3);
    assert_eq!(db.gates[1].inputs, vec![3, 2]);
    assert_eq!(db.gates[1].output, 4);

    // gate 1 is an xor of n1 and c.
    let t = db.gate_table(1).unwrap();
    assert_eq!(format!("{t:?}"), "TruthTable(2; 0110)");
}

#[test]
fn gates_out_of_order() {
    // a gate may read a net that is only driven later in the file.
    let db = NetlistDB::from_blif_source("\
.model reordered
.inputs a b
.outputs f
.names n1 f
0 1
.names a b n1
11 1
.end
", None).unwrap();
    assert_eq!(db.topo_order, vec![1, 0]);
}

#[test]
fn threshold_annotation_into_db() {
    let db = NetlistDB::from_blif_source("\
.model annotated
.inputs a b
.outputs f
# tlg weights=[1,1] threshold=2
.names a b f
11 1
.end
", None).unwrap();
    match &db.gates[0].func {
        GateFunc::Threshold(t) => {
            assert_eq!(t.weights, vec![1, 1]);
            assert_eq!(t.threshold, 2);
        }
        other => panic!("expected threshold func, got {other:?}")
    }
}

#[test]
fn model_selection() {
    let two = "\
.model first
.inputs a
.outputs f
.names a f
1 1
.end
.model second
.inputs x
.outputs g
.names x g
0 1
.end
";
    let db = NetlistDB::from_blif_source(two, None).unwrap();
    assert_eq!(db.name, "first");
    let db = NetlistDB::from_blif_source(two, Some("second")).unwrap();
    assert_eq!(db.name, "second");

    let err = NetlistDB::from_blif_source(two, Some("third")).unwrap_err();
    assert!(matches!(err, NetlistError::Build(
        BuildError::ModelNotFound { .. })));
}

#[test]
fn to_blif_roundtrip() {
    let db = NetlistDB::from_blif_source(BLIF_SIMPLE, None).unwrap();
    assert_eq!(format!("{}", db.to_blif()), BLIF_SIMPLE);
}

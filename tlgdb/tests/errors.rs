use tlgdb::*;

fn build_err(source: &str) -> BuildError {
    match NetlistDB::from_blif_source(source, None).unwrap_err() {
        NetlistError::Build(e) => e,
        other => panic!("expected build error, got {other:?}")
    }
}

#[test]
fn undeclared_net() {
    clilog::init_stdout_simple_trace();
    let e = build_err("\
.model bad
.inputs a
.outputs f
.names a ghost f
11 1
.end
");
    assert_eq!(e, BuildError::UndeclaredNet {
        net: "ghost".into(), line: 4
    });
    println!("error display: {e}");
}

#[test]
fn undeclared_output() {
    let e = build_err("\
.model bad
.inputs a
.outputs f g
.names a f
1 1
.end
");
    assert!(matches!(e, BuildError::UndeclaredNet { ref net, .. }
                     if net == "g"));
}

#[test]
fn duplicate_output_driver() {
    let e = build_err("\
.model bad
.inputs a b
.outputs f
.names a f
1 1
.names b f
1 1
.end
");
    assert_eq!(e, BuildError::DuplicateOutputDriver {
        net: "f".into(), line: 6
    });
}

#[test]
fn driving_a_primary_input() {
    let e = build_err("\
.model bad
.inputs a b
.outputs f
.names b a
1 1
.names a f
1 1
.end
");
    assert!(matches!(e, BuildError::DuplicateOutputDriver { ref net, .. }
                     if net == "a"));
}

#[test]
fn combinational_loop() {
    let e = build_err("\
.model loop
.inputs a
.outputs f
.names a x f
11 1
.names a f x
11 1
.end
");
    assert!(matches!(e, BuildError::CombinationalLoop { .. }));
}

#[test]
fn no_model() {
    let e = build_err("# empty file\n");
    assert_eq!(e, BuildError::NoModel);
}

#[test]
fn parse_error_forwarded() {
    let err = NetlistDB::from_blif_source("\
.model broken
.inputs a
.outputs f
.names a f
1 1
", None).unwrap_err();
    match err {
        NetlistError::Parse(e) => {
            assert_eq!(e.kind, blifparse::ParseErrorKind::UnterminatedModel);
        }
        other => panic!("expected parse error, got {other:?}")
    }
}

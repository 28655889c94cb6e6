//! unit tests for blifparse

use blifparse::*;

const BLIF_SIMPLE: &str = include_str!("simple.blif");
const BLIF_ANNOTATED: &str = include_str!("annotated.blif");

#[test]
fn test_simple() {
    clilog::init_stdout_simple_trace();
    let parsed = Blif::parse_str(BLIF_SIMPLE).expect("parse error");
    println!("Parsed is: {parsed:?}");
    println!("Restructure: \n{parsed}");
    assert_eq!(format!("{parsed}"), "\
.model simple
.inputs a b c
.outputs f
.names a b n1
11 1
.names n1 c f
10 1
01 1
.end
");
    let (name, m) = &parsed.models[0];
    assert_eq!(name, "simple");
    assert_eq!(m.names.len(), 2);
    assert_eq!(m.names[0].input_nets(), ["a", "b"]);
    assert_eq!(m.names[0].output_net(), "n1");
    // the continuation-joined .names starts at its first physical line.
    assert_eq!(m.names[0].line, 5);
    assert_eq!(m.names[1].line, 8);
}

#[test]
fn test_tlg_annotation_roundtrip() {
    clilog::init_stdout_simple_trace();
    let parsed = Blif::parse_str(BLIF_ANNOTATED).expect("parse error");
    let (_, m) = &parsed.models[0];
    assert_eq!(m.names[0].tlg,
               Some(BlifTlg { weights: vec![1, 1], threshold: 2 }));
    assert_eq!(format!("{parsed}"), BLIF_ANNOTATED);
}

#[test]
fn test_constant_block() {
    let parsed = Blif::parse_str("\
.model consts
.outputs one zero
.names one
1
.names zero
.end
").expect("parse error");
    let (_, m) = &parsed.models[0];
    assert_eq!(m.names[0].arity(), 0);
    assert_eq!(m.names[0].rows,
               vec![BlifRow { mask: "".into(), output: true }]);
    assert!(m.names[1].rows.is_empty());
}

#[test]
fn test_unterminated_model() {
    let err = Blif::parse_str("\
.model broken
.inputs a
.outputs f
.names a f
1 1
").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnterminatedModel);
    assert_eq!(err.line, 1);
    println!("error display: {err}");
}

#[test]
fn test_bad_cover_row() {
    let err = Blif::parse_str("\
.model bad
.inputs a b
.outputs f
.names a b f
111 1
.end
").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::BadCoverRow);
    assert_eq!(err.line, 5);

    let err = Blif::parse_str("\
.model bad
.inputs a
.outputs f
.names a f
1 2
.end
").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::BadCoverRow);
}

#[test]
fn test_unsupported_directive() {
    let err = Blif::parse_str("\
.model seq
.inputs d clk
.outputs q
.latch d q re clk 0
.end
").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnsupportedDirective);
    assert_eq!(err.line, 4);
}

#[test]
fn test_malformed_header() {
    let err = Blif::parse_str(".model\n.end\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MalformedHeader);
    assert_eq!(err.line, 1);
}

#[test]
fn test_stray_row() {
    let err = Blif::parse_str("11 1\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::StrayLine);
}

#[test]
fn test_two_models() {
    let parsed = Blif::parse_str("\
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
").expect("parse error");
    assert_eq!(parsed.models.len(), 2);
    assert_eq!(parsed.models[0].0, "first");
    assert_eq!(parsed.models[1].0, "second");
}

use super::*;
use std::fmt;
use std::str::FromStr;
use nom::{
    IResult,
    combinator::{ value, map, recognize, opt, all_consuming },
    branch::alt,
    multi::separated_list0,
    sequence::{ delimited, preceded, separated_pair, terminated, tuple },
    // BLIF files are parsed in-memory. so we only include completes.
    character::complete::{ char, digit1 },
    bytes::complete::{ tag, take_till1, take_while, take_while1 },
};

fn u82str_unsafe(i: &[u8]) -> &str {
    unsafe { std::str::from_utf8_unchecked(i) }
}

#[inline]
fn is_sp(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

/// zero or more spaces/tabs. newlines never occur inside a logical line.
fn sp0(i: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while(is_sp)(i)
}

/// one or more spaces/tabs.
fn sp1(i: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while1(is_sp)(i)
}

/// Parse a net or model identifier. BLIF identifiers are any run of
/// non-blank characters.
fn ident(i: &[u8]) -> IResult<&[u8], CompactString> {
    map(take_till1(is_sp),
        |s| CompactString::from(u82str_unsafe(s)))(i)
}

fn int(i: &[u8]) -> IResult<&[u8], i64> {
    map(recognize(preceded(opt(char('-')), digit1)),
        |s| i64::from_str(u82str_unsafe(s)).unwrap())(i)
}

fn ident_list(i: &[u8]) -> IResult<&[u8], Vec<CompactString>> {
    delimited(sp0, separated_list0(sp1, ident), sp0)(i)
}

fn cover_mask(i: &[u8]) -> IResult<&[u8], CompactString> {
    map(take_while1(|c| matches!(c, b'0' | b'1' | b'-')),
        |s| CompactString::from(u82str_unsafe(s)))(i)
}

fn cover_outbit(i: &[u8]) -> IResult<&[u8], bool> {
    alt((value(false, char('0')), value(true, char('1'))))(i)
}

/// A cover row is either `mask bit`, or a lone bit for a
/// constant (zero-input) block.
fn cover_row(i: &[u8]) -> IResult<&[u8], BlifRow> {
    delimited(sp0, alt((
        map(separated_pair(cover_mask, sp1, cover_outbit),
            |(mask, output)| BlifRow { mask, output }),
        map(cover_outbit,
            |output| BlifRow { mask: CompactString::new_inline(""), output }),
    )), sp0)(i)
}

/// `# tlg weights=[1,-2] threshold=2`
fn tlg_annot(i: &[u8]) -> IResult<&[u8], BlifTlg> {
    map(tuple((
        sp0, char('#'), sp0, tag("tlg"), sp1,
        tag("weights="),
        delimited(char('['),
                  separated_list0(char(','), delimited(sp0, int, sp0)),
                  char(']')),
        sp1, tag("threshold="), int, sp0
    )), |(_, _, _, _, _, _, weights, _, _, threshold, _)| BlifTlg {
        weights, threshold
    })(i)
}

/// One logical (continuation-joined, comment-stripped) line.
#[derive(Debug)]
enum Line {
    Model(CompactString),
    Inputs(Vec<CompactString>),
    Outputs(Vec<CompactString>),
    Names(Vec<CompactString>),
    End,
    Row(BlifRow),
}

fn directive_line(i: &[u8]) -> IResult<&[u8], Line> {
    alt((
        map(preceded(tag(".model"), delimited(sp1, ident, sp0)),
            Line::Model),
        map(preceded(tag(".inputs"), ident_list), Line::Inputs),
        map(preceded(tag(".outputs"), ident_list), Line::Outputs),
        map(preceded(tag(".names"), ident_list), Line::Names),
        map(terminated(tag(".end"), sp0), |_| Line::End),
    ))(i)
}

/// Kinds of parse failures, matching the structural checks the
/// format subset requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A `.model`/`.inputs`/`.outputs`/`.names`/`.end` directive with
    /// missing or malformed operands.
    MalformedHeader,
    /// A model with no matching `.end`.
    UnterminatedModel,
    /// A cover row with bad symbols or the wrong arity.
    BadCoverRow,
    /// A directive outside the supported structural subset
    /// (`.latch`, `.subckt`, ...).
    UnsupportedDirective,
    /// Content outside any model, or a cover row outside `.names`.
    StrayLine,
    /// Underlying I/O failure from [Blif::parse_file].
    Io,
}

/// A `Display`able parsing error pointing at the offending source line.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// 1-based line number. 0 for I/O errors.
    pub line: usize,
    detail: String,
}

impl ParseError {
    fn new(kind: ParseErrorKind, line: usize, detail: impl Into<String>) -> ParseError {
        ParseError { kind, line, detail: detail.into() }
    }

    pub(crate) fn io(e: std::io::Error) -> ParseError {
        ParseError::new(ParseErrorKind::Io, 0, format!("{}", e))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseErrorKind::*;
        let kind = match self.kind {
            MalformedHeader => "malformed header",
            UnterminatedModel => "unterminated model",
            BadCoverRow => "bad cover row",
            UnsupportedDirective => "unsupported directive",
            StrayLine => "stray line",
            Io => return write!(f, "io error: {}", self.detail)
        };
        write!(f, "{} at line {}: {}", kind, self.line, self.detail)
    }
}

impl From<ParseError> for String {
    fn from(e: ParseError) -> String {
        format!("{}", e)
    }
}

fn strip_cr(line: &[u8]) -> &[u8] {
    match line.last() {
        Some(b'\r') => &line[..line.len() - 1],
        _ => line
    }
}

/// cut a physical line at its `#` comment, if any.
fn strip_comment(line: &[u8]) -> &[u8] {
    match line.iter().position(|&c| c == b'#') {
        Some(p) => &line[..p],
        None => line
    }
}

fn trim(mut line: &[u8]) -> &[u8] {
    while let Some(c) = line.first() {
        if !is_sp(*c) { break }
        line = &line[1..];
    }
    while let Some(c) = line.last() {
        if !is_sp(*c) { break }
        line = &line[..line.len() - 1];
    }
    line
}

/// Join physical lines into logical ones: full-line comments are kept
/// verbatim (they may carry a tlg annotation), everything else is
/// comment-stripped and backslash continuations are merged. Each
/// logical line keeps the number of its first physical line.
fn assemble_logical_lines(i: &[u8]) -> Vec<(usize, Vec<u8>)> {
    let mut out = Vec::new();
    let mut lines = i.split(|&c| c == b'\n').enumerate();
    while let Some((idx, raw)) = lines.next() {
        let raw = strip_cr(raw);
        if trim(raw).first() == Some(&b'#') {
            out.push((idx + 1, trim(raw).to_vec()));
            continue;
        }
        let start = idx + 1;
        let mut text = strip_comment(raw).to_vec();
        loop {
            while let Some(c) = text.last() {
                if !is_sp(*c) { break }
                text.pop();
            }
            if text.last() != Some(&b'\\') { break }
            text.pop();
            text.push(b' ');
            match lines.next() {
                Some((_, raw)) => text.extend_from_slice(
                    strip_comment(strip_cr(raw))),
                None => break
            }
        }
        let text = trim(&text).to_vec();
        if !text.is_empty() {
            out.push((start, text));
        }
    }
    out
}

/// is this full-line comment shaped like a tlg annotation?
fn looks_like_tlg(line: &[u8]) -> bool {
    let rest = trim(&line[1..]);
    rest.starts_with(b"tlg") &&
        rest.get(3).copied().map(is_sp).unwrap_or(false)
}

pub(crate) fn parse_blif(i: &[u8]) -> Result<Blif, ParseError> {
    use ParseErrorKind::*;

    let mut models: Vec<(CompactString, BlifModel)> = Vec::new();
    let mut cur: Option<(CompactString, BlifModel)> = None;
    let mut pending_tlg: Option<BlifTlg> = None;

    for (line_no, text) in assemble_logical_lines(i) {
        if text[0] == b'#' {
            if looks_like_tlg(&text) {
                match all_consuming(tlg_annot)(&text[..]) {
                    Ok((_, t)) => { pending_tlg = Some(t); }
                    Err(_) => clilog::warn!(
                        BLIF_TLG_ANNOT,
                        "line {}: unreadable tlg annotation, \
                         treating as plain comment", line_no)
                }
            }
            continue;
        }

        let parsed = if text[0] == b'.' {
            match all_consuming(directive_line)(&text[..]) {
                Ok((_, l)) => l,
                Err(_) => {
                    let kw = u82str_unsafe(
                        text.split(|&c| is_sp(c)).next().unwrap());
                    return Err(match kw {
                        ".model" | ".inputs" | ".outputs"
                        | ".names" | ".end" => ParseError::new(
                            MalformedHeader, line_no,
                            format!("cannot parse `{}` directive", kw)),
                        _ => ParseError::new(
                            UnsupportedDirective, line_no,
                            format!("directive `{}` is outside the \
                                     structural subset", kw))
                    })
                }
            }
        } else {
            match all_consuming(cover_row)(&text[..]) {
                Ok((_, r)) => Line::Row(r),
                Err(_) => return Err(ParseError::new(
                    BadCoverRow, line_no,
                    format!("cannot parse cover row `{}`",
                            u82str_unsafe(&text))))
            }
        };

        if pending_tlg.is_some() && !matches!(parsed, Line::Names(_)) {
            pending_tlg = None;
            clilog::warn!(BLIF_TLG_DANGLING,
                          "line {}: tlg annotation does not precede \
                           a .names block, dropped", line_no);
        }

        match parsed {
            Line::Model(name) => {
                if let Some((prev_name, prev)) = &cur {
                    return Err(ParseError::new(
                        UnterminatedModel, prev.line,
                        format!("model `{}` has no matching .end",
                                prev_name)))
                }
                cur = Some((name, BlifModel {
                    line: line_no, ..Default::default()
                }));
            }
            Line::Inputs(nets) => match &mut cur {
                Some((_, m)) => m.inputs.extend(nets),
                None => return Err(ParseError::new(
                    StrayLine, line_no, ".inputs outside a model"))
            },
            Line::Outputs(nets) => match &mut cur {
                Some((_, m)) => m.outputs.extend(nets),
                None => return Err(ParseError::new(
                    StrayLine, line_no, ".outputs outside a model"))
            },
            Line::Names(ionets) => {
                if ionets.is_empty() {
                    return Err(ParseError::new(
                        MalformedHeader, line_no,
                        ".names with no nets"))
                }
                let m = match &mut cur {
                    Some((_, m)) => m,
                    None => return Err(ParseError::new(
                        StrayLine, line_no, ".names outside a model"))
                };
                let tlg = match pending_tlg.take() {
                    Some(t) if t.weights.len() != ionets.len() - 1 => {
                        clilog::warn!(
                            BLIF_TLG_ARITY,
                            "line {}: tlg annotation has {} weights \
                             for {} inputs, dropped",
                            line_no, t.weights.len(), ionets.len() - 1);
                        None
                    }
                    t => t
                };
                m.names.push(BlifNames {
                    line: line_no, ionets, rows: Vec::new(), tlg
                });
            }
            Line::End => {
                match cur.take() {
                    Some(m) => models.push(m),
                    None => return Err(ParseError::new(
                        StrayLine, line_no, ".end outside a model"))
                }
            }
            Line::Row(row) => {
                let block = cur.as_mut()
                    .and_then(|(_, m)| m.names.last_mut());
                let block = match block {
                    Some(b) => b,
                    None => return Err(ParseError::new(
                        StrayLine, line_no,
                        "cover row outside a .names block"))
                };
                if row.mask.len() != block.arity() {
                    return Err(ParseError::new(
                        BadCoverRow, line_no,
                        format!("row `{}` has {} input symbols, \
                                 .names at line {} has {} inputs",
                                row.mask, row.mask.len(),
                                block.line, block.arity())))
                }
                block.rows.push(row);
            }
        }
    }

    if let Some((name, m)) = cur {
        return Err(ParseError::new(
            UnterminatedModel, m.line,
            format!("model `{}` has no matching .end", name)))
    }

    Ok(Blif { models })
}

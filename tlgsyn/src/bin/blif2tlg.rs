use std::env;
use std::path::Path;
use std::process::exit;
use tlgsyn::SynthConfig;

/// One-shot BLIF to threshold-logic converter. Writes the converted
/// netlist next to the input with a `_tlg` suffix.
fn main() {
    clilog::init_stderr_color_debug();
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <input.blif>", args[0]);
        exit(1);
    }

    let input = Path::new(&args[1]);
    let source = match std::fs::read_to_string(input) {
        Ok(s) => s,
        Err(e) => {
            clilog::error!(TLG_READ, "cannot read {}: {}",
                           input.display(), e);
            exit(1);
        }
    };

    let converted = match tlgsyn::convert_source(
        &source, &SynthConfig::default()
    ) {
        Ok(s) => s,
        Err(e) => {
            clilog::error!(TLG_CONVERT, "{}: {}", input.display(), e);
            exit(1);
        }
    };

    let output = tlgsyn::output_path(input);
    if let Err(e) = std::fs::write(&output, converted) {
        clilog::error!(TLG_WRITE, "cannot write {}: {}",
                       output.display(), e);
        // a truncated output file must not be left behind.
        let _ = std::fs::remove_file(&output);
        exit(1);
    }
    clilog::info!(TLG_DONE, "wrote {}", output.display());
}

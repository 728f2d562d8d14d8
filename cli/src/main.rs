use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};

use clap::Parser;
use json_ledger::options::MAX_DEPTH_CEILING;
use json_ledger::value::write_pretty;
use json_ledger::{Bundle, ParseOptions, ReleaseReport, Token, Value};

#[derive(Parser, Debug)]
#[command(name = "jsonl", version, about = "Parse a JSON document into a ledger-tracked tree")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Require commas between members and reject trailing commas or content.
    #[arg(long)]
    strict: bool,

    /// Maximum container nesting depth, at most 512.
    #[arg(
        long = "max-depth",
        value_name = "number",
        default_value_t = json_ledger::options::DEFAULT_MAX_DEPTH,
        value_parser = parse_max_depth
    )]
    max_depth: usize,

    /// Print only the value at a dotted path such as `data.0.slug`.
    #[arg(long, value_name = "path")]
    get: Option<String>,

    /// Print the token stream instead of the tree.
    #[arg(long)]
    tokens: bool,

    /// Report what the ledger released after printing.
    #[arg(long)]
    stats: bool,

    /// Indentation size; 0 prints compact JSON (default: 2).
    #[arg(long, value_name = "number", default_value_t = 2)]
    indent: usize,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let input = read_input(args.input.as_deref())?;

    if args.tokens {
        let tokens = json_ledger::tokenize(&input)?;
        return with_output_writer(args.output.as_deref(), |writer| {
            write_tokens(writer, &tokens)
        });
    }

    let options = ParseOptions::new()
        .with_strict(args.strict)
        .with_max_depth(args.max_depth);
    let bundle = json_ledger::parse_slice_with_options(&input, &options)?;
    let value = select(&bundle, args.get.as_deref())?;

    with_output_writer(args.output.as_deref(), |writer| {
        write_json(writer, value, args.indent)
    })?;

    let report = bundle.release();
    if args.stats {
        print_stats(&report);
    }
    Ok(())
}

fn parse_max_depth(raw: &str) -> Result<usize, String> {
    let depth: usize = raw.parse().map_err(|err| format!("{err}"))?;
    if depth == 0 || depth > MAX_DEPTH_CEILING {
        return Err(format!("must be between 1 and {MAX_DEPTH_CEILING}"));
    }
    Ok(depth)
}

fn select<'a>(bundle: &'a Bundle, path: Option<&str>) -> Result<&'a Value, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(bundle.root());
    };
    bundle
        .pointer(path)
        .ok_or_else(|| format!("path not found: {path}").into())
}

fn read_input(input: Option<&str>) -> Result<Vec<u8>, Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(fs::read(path)?),
    }
}

fn with_output_writer<F>(path: Option<&str>, f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Box<dyn Error>>,
{
    match path {
        Some(path) if path != "-" => {
            let mut file = fs::File::create(path)?;
            f(&mut file)
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            f(&mut handle)
        }
    }
}

fn write_tokens(writer: &mut dyn Write, tokens: &[Token]) -> Result<(), Box<dyn Error>> {
    for token in tokens {
        match token.text() {
            Some(text) => writeln!(writer, "{}\t{}\t{}", token.line, token.kind, text)?,
            None => writeln!(writer, "{}\t{}", token.line, token.kind)?,
        }
    }
    Ok(())
}

fn write_json(writer: &mut dyn Write, value: &Value, indent: usize) -> Result<(), Box<dyn Error>> {
    let mut out = String::new();
    write_pretty(value, indent, &mut out);
    out.push('\n');
    writer.write_all(out.as_bytes())?;
    Ok(())
}

fn print_stats(report: &ReleaseReport) {
    println!(
        "ℹ Released {} allocations ({} scalars, {} arrays, {} maps)",
        report.total(),
        report.scalars,
        report.arrays,
        report.maps
    );
}

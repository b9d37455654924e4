use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use jsonpush::options::{JsonParserOptions, JsonParserOptionsBuilder};
use jsonpush::sink::{IoSink, NullSink};
use jsonpush::{EventSink, JsonParser, JsonPrinter, ParseError};

/// Validate and reformat JSON documents
#[derive(Parser)]
#[command(name = "jsonlint", version)]
struct Args {
    /// Input files (`-` reads from standard input)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Pretty-print the document instead of just checking it
    #[arg(long)]
    format: bool,

    /// Quietly check validity; exit code 1 means invalid
    #[arg(long)]
    verify: bool,

    /// Disallow C and YAML comments (both are allowed by default)
    #[arg(long)]
    no_comments: bool,

    /// Disallow C-style comments
    #[arg(long)]
    no_c_comments: bool,

    /// Disallow YAML-style comments
    #[arg(long)]
    no_yaml_comments: bool,

    /// Limit the nesting depth (0 = no limit)
    #[arg(long, default_value_t = 0)]
    max_nesting: usize,

    /// Limit the byte length of a single string or number (0 = no limit)
    #[arg(long, default_value_t = 0)]
    max_data: usize,

    /// The string used to indent one level in formatted output
    #[arg(long, default_value = "\t")]
    indent_string: String,

    /// Write formatted output to a file instead of standard output
    #[arg(short)]
    output: Option<PathBuf>,
}

impl Args {
    fn parser_options(&self) -> JsonParserOptions {
        JsonParserOptionsBuilder::default()
            .with_max_nesting(self.max_nesting)
            .with_max_data(self.max_data)
            .with_allow_c_comments(!self.no_comments && !self.no_c_comments)
            .with_allow_yaml_comments(!self.no_comments && !self.no_yaml_comments)
            .build()
    }
}

fn open_input(path: &Path) -> io::Result<Box<dyn Read>> {
    if path.as_os_str() == "-" {
        Ok(Box::new(io::stdin()))
    } else {
        Ok(Box::new(File::open(path)?))
    }
}

/// Feed a reader to the parser in chunks, tracking the line and column of
/// the first rejected byte.
fn process<S: EventSink>(
    parser: &mut JsonParser<S>,
    input: &mut dyn Read,
) -> io::Result<Result<(), (ParseError, usize, usize)>> {
    let mut line = 1;
    let mut col = 0;
    let mut buffer = [0u8; 4096];
    loop {
        let read = input.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        let before = parser.parsed_bytes();
        let result = parser.feed(&buffer[..read]);
        let accepted = parser.parsed_bytes() - before;
        for &b in &buffer[..accepted] {
            if b == b'\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        if let Err(e) = result {
            return Ok(Err((e, line, col)));
        }
    }
    if let Err(e) = parser.finish() {
        return Ok(Err((e, line, col)));
    }
    Ok(Ok(()))
}

fn lint_file(args: &Args, path: &Path) -> io::Result<u8> {
    let mut input = open_input(path)?;
    let quiet = args.verify;

    if args.format {
        let writer: BufWriter<Box<dyn Write>> = BufWriter::new(match &args.output {
            Some(out) => Box::new(File::create(out)?),
            None => Box::new(io::stdout()),
        });
        let printer =
            JsonPrinter::new_pretty(IoSink(writer)).with_indent(args.indent_string.clone());
        let mut parser = JsonParser::new_with_options(printer, args.parser_options());
        if let Err((e, line, col)) = process(&mut parser, input.as_mut())? {
            eprintln!("{}: line {}, col {}: {}", path.display(), line, col, e);
            return Ok(1);
        }
        if !parser.is_done() {
            eprintln!("{}: syntax error: document is incomplete", path.display());
            return Ok(1);
        }
        let mut writer = parser.into_sink().into_sink().into_inner();
        writer.write_all(b"\n")?;
        writer.flush()?;
        return Ok(0);
    }

    let mut parser = JsonParser::new_with_options(NullSink, args.parser_options());
    if let Err((e, line, col)) = process(&mut parser, input.as_mut())? {
        if !quiet {
            eprintln!("{}: line {}, col {}: {}", path.display(), line, col, e);
        }
        return Ok(1);
    }
    if !parser.is_done() {
        if !quiet {
            eprintln!("{}: syntax error: document is incomplete", path.display());
        }
        return Ok(1);
    }
    Ok(0)
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut exit = 0u8;
    for file in &args.files {
        match lint_file(&args, file) {
            Ok(code) => exit = exit.max(code),
            Err(e) => {
                eprintln!("error: cannot process {}: {}", file.display(), e);
                exit = 2;
            }
        }
    }
    ExitCode::from(exit)
}

use std::fs::OpenOptions;
use std::io::{Read, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use codec::encode::{run_decode, run_encode, Encoding};
use codec::hash::{run_compare, run_hash, HashAlgorithm};
use codec::logger::setup_logger;
use codec::util;

/// codec — encoding/decoding and hashing tool.
///
/// Inputs are file paths (glob patterns included) or literal strings; with
/// no input argument, data is read from stdin.
#[derive(Parser)]
#[command(name = "codec", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable the per-operation [INFO] report
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Write output to FILE (appending); bare -o writes to <input>.<algo>
    #[arg(
        short = 'o',
        long,
        global = true,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    output: Option<String>,

    /// Repeat encoding/decoding N times
    #[arg(short = 'r', long, global = true, value_name = "N", default_value_t = 1)]
    repeat: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Encode data using the given algorithm
    Encode {
        algorithm: String,
        inputs: Vec<String>,
    },
    /// Decode data using the given algorithm
    Decode {
        algorithm: String,
        inputs: Vec<String>,
    },
    /// Calculate the hash of data or files
    Hash {
        algorithm: String,
        inputs: Vec<String>,
    },
    /// Compare the hashes of several files
    Compare {
        algorithm: String,
        files: Vec<String>,
    },
    /// List the supported algorithms
    List,
}

fn main() {
    let cli = Cli::parse();
    setup_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Encode { algorithm, inputs } => {
            let encoding = parse_encoding(algorithm)?;
            for input in gather_inputs(inputs)? {
                let result = run_encode(encoding, &input, cli.repeat)?;
                write_output(result.as_bytes(), &input, encoding.name(), &cli.output)?;
            }
        }
        Command::Decode { algorithm, inputs } => {
            let encoding = parse_encoding(algorithm)?;
            for input in gather_inputs(inputs)? {
                let result = run_decode(encoding, &input, cli.repeat)?;
                write_output(&result, &input, encoding.name(), &cli.output)?;
            }
        }
        Command::Hash { algorithm, inputs } => {
            let algorithm = parse_hash_algorithm(algorithm)?;
            for input in gather_inputs(inputs)? {
                let result = run_hash(algorithm, &input)?;
                write_output(result.as_bytes(), &input, algorithm.name(), &cli.output)?;
            }
        }
        Command::Compare { algorithm, files } => {
            let algorithm = parse_hash_algorithm(algorithm)?;
            let files = gather_inputs(files)?;
            let (_, report) = run_compare(algorithm, &files)?;
            match &cli.output {
                Some(path) if !path.is_empty() => append_to_file(path, report.as_bytes())?,
                _ => print!("{report}"),
            }
        }
        Command::List => print_list(),
    }
    Ok(())
}

fn parse_encoding(name: &str) -> Result<Encoding> {
    match Encoding::from_name(name) {
        Some(encoding) => Ok(encoding),
        None => bail!("unknown encoding algorithm: {name} (see `codec list`)"),
    }
}

fn parse_hash_algorithm(name: &str) -> Result<HashAlgorithm> {
    match HashAlgorithm::from_name(name) {
        Some(algorithm) => Ok(algorithm),
        None => bail!("unknown hash algorithm: {name} (see `codec list`)"),
    }
}

/// Expands the input arguments: no arguments means stdin, and any argument
/// that matches files as a glob pattern is replaced by the matches.
fn gather_inputs(inputs: &[String]) -> Result<Vec<String>> {
    if inputs.is_empty() {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("cannot read stdin")?;
        let text = String::from_utf8(buffer)
            .context("stdin is not valid UTF-8; pass binary data as a file path instead")?;
        return Ok(vec![text]);
    }

    let mut expanded = Vec::new();
    for input in inputs {
        let mut matches: Vec<String> = match glob::glob(input) {
            Ok(paths) => paths
                .filter_map(|entry| entry.ok())
                .map(|path| path.to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        if matches.is_empty() {
            expanded.push(input.clone());
        } else {
            expanded.append(&mut matches);
        }
    }
    Ok(expanded)
}

fn write_output(result: &[u8], input: &str, algo: &str, output: &Option<String>) -> Result<()> {
    match output {
        // -o FILE: append, so multi-input runs accumulate.
        Some(path) if !path.is_empty() => append_to_file(path, result)?,
        // Bare -o: derive the file name from the input.
        Some(_) => {
            let name = format!("{}.{algo}", util::base_name(input));
            std::fs::write(&name, result).with_context(|| format!("cannot write {name}"))?;
            log::info!("Result saved to file: {name}");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(result).context("cannot write stdout")?;
            if !result.ends_with(b"\n") {
                stdout.write_all(b"\n").context("cannot write stdout")?;
            }
        }
    }
    Ok(())
}

fn append_to_file(path: &str, data: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open output file {path}"))?;
    file.write_all(data)
        .with_context(|| format!("cannot write to output file {path}"))?;
    log::info!("Result saved to file: {path}");
    Ok(())
}

fn print_list() {
    println!(
        "Supported Actions and Algorithms:

Encoding / Decoding algorithms:
  base64         Standard Base64 encoding/decoding
  base64url      URL-safe Base64 encoding/decoding
  base32         Base32 encoding/decoding
  hex            Hexadecimal encoding/decoding
  base85         Base85 encoding/decoding
  base58         Bitcoin Base58 encoding/decoding
  url            URL percent encoding/decoding

Hash algorithms:
  md5
  sha1
  sha256
  sha512
  sha3-224
  sha3-256
  sha3-384
  sha3-512
  crc32-ieee
  crc32-castagnoli
  crc32-koopman
  blake2b-256
  blake2b-512
  blake2s-256"
    );
}

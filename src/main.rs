//! keccaksum CLI.
//!
//! Command-line front end for the SHA3 / SHAKE functions and the KAT runner.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use clap::{Parser, Subcommand, ValueEnum};
use fips202::conformance::{KatRunner, TestResult, DEFAULT_SHAKE_BYTES};
use fips202::keccak::{permute, KeccakState};
use fips202::params::{shake_x, Instance};
use fips202::{KeccakHash, Shake};
use std::fs::{self, File};
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Read size when streaming input through `update()`.
const CHUNK_SIZE: usize = 8 * 1024;

#[derive(Parser)]
#[command(name = "keccaksum")]
#[command(about = "SHA3 and SHAKE digests (FIPS 202)", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Encoding {
    /// Lowercase hex
    Hex,
    /// URL-safe base64
    Base64,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash files (or stdin) with a standard function
    Hash {
        /// SHA3-224, SHA3-256, SHA3-384, SHA3-512, SHAKE128 or SHAKE256
        #[arg(short, long, env = "KECCAKSUM_ALGORITHM", default_value = "SHA3-256")]
        algorithm: Instance,

        /// Output length in bytes (SHAKE only; defaults to twice the security level)
        #[arg(short = 'n', long)]
        length: Option<usize>,

        /// Output encoding
        #[arg(short, long, value_enum, default_value_t = Encoding::Hex)]
        encoding: Encoding,

        /// Input files; stdin when empty
        files: Vec<PathBuf>,
    },

    /// SHAKE-style sponge (dsbyte 0x1f) with a custom rate
    ShakeX {
        /// Rate in bytes, 1..=199
        #[arg(long)]
        rate: usize,

        /// Output length in bytes
        #[arg(short = 'n', long)]
        length: usize,

        /// Output encoding
        #[arg(short, long, value_enum, default_value_t = Encoding::Hex)]
        encoding: Encoding,

        /// Input files; stdin when empty
        files: Vec<PathBuf>,
    },

    /// Replay a known-answer fixture
    Kat {
        /// Path to the JSON fixture
        fixture: PathBuf,

        /// SHAKE output bytes compared per entry
        #[arg(long, default_value_t = DEFAULT_SHAKE_BYTES)]
        shake_bytes: usize,

        /// Write one report per mismatch into this directory
        #[arg(long)]
        repro_dir: Option<PathBuf>,
    },

    /// Print Keccak-f[1600] applied to the all-zero state
    PermuteZero,

    /// Show version information
    Version,
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn encode(bytes: &[u8], encoding: Encoding) -> String {
    match encoding {
        Encoding::Hex => hex::encode(bytes),
        Encoding::Base64 => URL_SAFE.encode(bytes),
    }
}

fn display_name(path: Option<&Path>) -> String {
    path.map_or_else(|| "-".to_string(), |p| p.display().to_string())
}

/// Stream a file (or stdin) into `hash`.
fn absorb_source<P>(hash: &mut KeccakHash<P>, path: Option<&Path>) -> io::Result<u64> {
    let mut reader: Box<dyn Read> = match path {
        Some(p) => Box::new(File::open(p)?),
        None => Box::new(io::stdin().lock()),
    };

    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                hash.update(&buf[..n]);
                total += n as u64;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

fn digest_source(instance: Instance, length: Option<usize>, path: Option<&Path>) -> io::Result<Vec<u8>> {
    match instance.sha3() {
        Some(mut hash) => {
            let absorbed = absorb_source(&mut hash, path)?;
            debug!(%instance, absorbed, "input absorbed");
            Ok(hash.digest())
        }
        None => {
            let mut hash = Shake::from_sponge(instance.sponge());
            let absorbed = absorb_source(&mut hash, path)?;
            debug!(%instance, absorbed, "input absorbed");
            Ok(hash.digest(length.unwrap_or(instance.security_bits() / 4)))
        }
    }
}

/// Run `f` on every source (stdin when `files` is empty) and print one line per digest.
fn for_each_source<F>(files: &[PathBuf], encoding: Encoding, mut f: F) -> ExitCode
where
    F: FnMut(Option<&Path>) -> io::Result<Vec<u8>>,
{
    let sources: Vec<Option<&Path>> = if files.is_empty() {
        vec![None]
    } else {
        files.iter().map(|p| Some(p.as_path())).collect()
    };

    let mut status = ExitCode::SUCCESS;
    for source in sources {
        match f(source) {
            Ok(digest) => println!("{}  {}", encode(&digest, encoding), display_name(source)),
            Err(e) => {
                eprintln!("keccaksum: {}: {}", display_name(source), e);
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}

fn run_kat(fixture: &Path, shake_bytes: usize, repro_dir: Option<&Path>) -> ExitCode {
    let runner = match KatRunner::load(fixture) {
        Ok(r) => r.with_shake_bytes(shake_bytes),
        Err(e) => {
            eprintln!("keccaksum: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(vectors = runner.vector_count(), "fixture loaded");

    let results = runner.run_all();
    println!("{}", results.summary());

    for bundle in &results.repros {
        print!("\n{}", bundle.to_report());
        if let Some(dir) = repro_dir {
            let path = dir.join(format!("{}.txt", bundle.test_id.replace('#', "_")));
            if let Err(e) = fs::create_dir_all(dir).and_then(|_| bundle.save(&path)) {
                warn!(path = %path.display(), error = %e, "could not save repro bundle");
            }
        }
    }
    for (id, result) in results.error_details() {
        if let TestResult::Error { message } = result {
            println!("ERROR {} - {}", id, message);
        }
    }

    if results.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Hash {
            algorithm,
            length,
            encoding,
            files,
        }) => {
            if length.is_some() && !algorithm.is_extendable() {
                warn!(%algorithm, "--length ignored for fixed-output functions");
            }
            for_each_source(&files, encoding, |path| digest_source(algorithm, length, path))
        }
        Some(Commands::ShakeX {
            rate,
            length,
            encoding,
            files,
        }) => {
            if let Err(e) = shake_x(rate) {
                eprintln!("keccaksum: {}", e);
                return ExitCode::FAILURE;
            }
            for_each_source(&files, encoding, |path| {
                let mut hash = shake_x(rate).map_err(|e| io::Error::new(ErrorKind::InvalidInput, e))?;
                absorb_source(&mut hash, path)?;
                Ok(hash.digest(length))
            })
        }
        Some(Commands::Kat {
            fixture,
            shake_bytes,
            repro_dir,
        }) => run_kat(&fixture, shake_bytes, repro_dir.as_deref()),
        Some(Commands::PermuteZero) => {
            println!("{}", permute(&KeccakState::ZERO));
            ExitCode::SUCCESS
        }
        Some(Commands::Version) => {
            println!("keccaksum v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        None => {
            println!("keccaksum v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            ExitCode::SUCCESS
        }
    }
}

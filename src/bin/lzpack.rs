use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use lzpack::{compress_with, CompressConfig, Decoder, SearchStrategy, TokenReader};

#[derive(Parser, Debug)]
#[command(name = "lzpack")]
#[command(about = "Compress and decompress bit-packed LZ77 streams")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file
    Compress {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Number of threads for match search (0 = auto, 1 = single-threaded)
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,

        /// Use the reference brute-force match search (same output, slower)
        #[arg(long)]
        brute_force: bool,

        /// Show verbose statistics
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decompress a file
    Decompress {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: PathBuf,

        /// Require exactly this many output bytes
        #[arg(long)]
        expected_len: Option<usize>,

        /// Show verbose statistics
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the token stream of a compressed file
    Inspect {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Stop after this many tokens
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Exit code for any failure
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.command {
        Command::Compress { input, output, threads, brute_force, verbose } => {
            let search =
                if brute_force { SearchStrategy::BruteForce } else { SearchStrategy::HashChain };
            let config = CompressConfig { search, num_threads: threads };

            let data = read_input(&input)?;

            let start = std::time::Instant::now();
            let (encoded, stats) = compress_with(&data, &config)?;
            let elapsed = start.elapsed();

            write_output(&output, &encoded)?;

            if verbose {
                eprintln!("Compression complete:");
                eprintln!("  Input bytes:      {}", stats.input_bytes);
                eprintln!("  Output bytes:     {}", stats.output_bytes);
                eprintln!("  Output bits:      {}", stats.output_bits);
                eprintln!("  Literals:         {}", stats.literals);
                eprintln!("  Matches:          {}", stats.matches);
                eprintln!("  Matched bytes:    {}", stats.matched_bytes);
                eprintln!("  Ratio:            {:.3}", stats.ratio());
                report_timing(stats.input_bytes, elapsed);
            }
        }

        Command::Decompress { input, output, expected_len, verbose } => {
            let decoder = match expected_len {
                Some(len) => Decoder::with_expected_len(len),
                None => Decoder::new(),
            };

            let encoded = read_input(&input)?;

            let start = std::time::Instant::now();
            let decoded = decoder.decode(&encoded)?;
            let elapsed = start.elapsed();

            write_output(&output, &decoded)?;

            if verbose {
                eprintln!("Decompression complete:");
                eprintln!("  Input bytes:      {}", encoded.len());
                eprintln!("  Output bytes:     {}", decoded.len());
                report_timing(decoded.len() as u64, elapsed);
            }
        }

        Command::Inspect { input, limit } => {
            let encoded = read_input(&input)?;
            let mut stdout = io::stdout().lock();

            let mut reader = TokenReader::new(&encoded);
            let mut produced = 0usize;
            let mut count = 0usize;

            while limit.map_or(true, |limit| count < limit) {
                let bit_pos = reader.position();
                let Some(token) = reader.next() else {
                    break;
                };
                let token = token?;
                writeln!(stdout, "{:>10} {:>10}  {}", bit_pos, produced, token)?;
                produced += token.uncompressed_size();
                count += 1;
            }

            eprintln!("Tokens: {}", count);
            eprintln!("Uncompressed bytes: {}", produced);
        }
    }

    Ok(())
}

fn is_stdio(path: &Path) -> bool {
    path.to_str() == Some("-")
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    if is_stdio(path) {
        io::stdin().lock().read_to_end(&mut data)?;
    } else {
        BufReader::new(File::open(path)?).read_to_end(&mut data)?;
    }
    Ok(data)
}

fn write_output(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut output: Box<dyn Write> = if is_stdio(path) {
        Box::new(io::stdout().lock())
    } else {
        Box::new(BufWriter::new(File::create(path)?))
    };
    output.write_all(data)?;
    output.flush()
}

fn report_timing(bytes: u64, elapsed: Duration) {
    eprintln!("  Time:             {:.2?}", elapsed);
    eprintln!(
        "  Throughput:       {:.1} MB/s",
        bytes as f64 / elapsed.as_secs_f64().max(f64::EPSILON) / 1_000_000.0
    );
}

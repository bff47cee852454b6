use clap::{Parser, Subcommand};
use konversi_nilai::cli;
use konversi_nilai::error::KonversiResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "konversi")]
#[command(about = "Rescale scores into a target range, with Excel import/export.")]
#[command(long_about = "Konversi - score range conversion

Maps a list of numbers linearly onto an integer range [min, max]:
the smallest number becomes min, the largest becomes max.

COMMANDS:
  convert   - Convert comma separated numbers
  import    - Read names and numbers from an Excel workbook
  process   - Import, convert and export to hasil_konversi.xlsx
  template  - Write the upload template workbook

EXAMPLES:
  konversi convert \"60, 75, 90\" --min 85 --max 95
  konversi import nilai.xlsx records.yaml
  konversi process nilai.xlsx --output hasil_konversi.xlsx

Set KONVERSI_MIN / KONVERSI_MAX to change the default range (85-95).
Set RUST_LOG=konversi_nilai=debug for diagnostic logs.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert comma separated numbers into the range
    Convert {
        /// Numbers separated by commas, e.g. "60, 75, 90"
        numbers: String,

        /// Lower bound of the target range
        #[arg(long, default_value = "85", env = "KONVERSI_MIN", allow_hyphen_values = true)]
        min: i64,

        /// Upper bound of the target range
        #[arg(long, default_value = "95", env = "KONVERSI_MAX", allow_hyphen_values = true)]
        max: i64,

        /// Show parse details
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Read an Excel workbook into records.

Every sheet is read in order. Row 1 is the header; column A holds the
name and column B the number. Rows without a number are skipped.

The records can be written to a .json or .yaml file for later use
with 'konversi process'.")]
    /// Read names and numbers from an Excel workbook
    Import {
        /// Path to the workbook (.xlsx, .xls, .ods)
        input: PathBuf,

        /// Optional records file (.json, .yaml)
        output: Option<PathBuf>,

        /// Show every imported record
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Import, convert and export in one step.

The input is a workbook or a records file written by 'konversi import'.
The output workbook has one sheet per input sheet with the columns
Nama Lengkap, Angka Acak and Hasil Konversi.")]
    /// Convert a workbook and write hasil_konversi.xlsx
    Process {
        /// Workbook (.xlsx, .xls, .ods) or records file (.json, .yaml)
        input: PathBuf,

        /// Output workbook (default: hasil_konversi.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Lower bound of the target range
        #[arg(long, default_value = "85", env = "KONVERSI_MIN", allow_hyphen_values = true)]
        min: i64,

        /// Upper bound of the target range
        #[arg(long, default_value = "95", env = "KONVERSI_MAX", allow_hyphen_values = true)]
        max: i64,

        /// Show per-sheet details
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the empty upload template
    Template {
        /// Output workbook path
        #[arg(default_value = "template_upload.xlsx")]
        output: PathBuf,
    },
}

fn main() -> KonversiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "konversi_nilai=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            numbers,
            min,
            max,
            verbose,
        } => cli::convert(numbers, min, max, verbose),

        Commands::Import {
            input,
            output,
            verbose,
        } => cli::import(input, output, verbose),

        Commands::Process {
            input,
            output,
            min,
            max,
            verbose,
        } => cli::process(input, output, min, max, verbose),

        Commands::Template { output } => cli::template(output),
    }
}

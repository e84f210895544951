//! rayconfig CLI - Raycast config decryption and note export tool

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use rayconfig::{
    decrypt_file, detect_format_from_path, encrypt_bytes, load_config, ExportOptions,
    InputFormat, NoteExporter, NoteOutcome,
};

/// Environment variable the password may be read from.
const PASSWORD_ENV: &str = "RAYCONFIG_PASSWORD";

#[derive(Parser)]
#[command(name = "rayconfig")]
#[command(version)]
#[command(about = "Decrypt Raycast config exports and extract notes to Markdown", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decrypt a .rayconfig export to JSON
    Decrypt {
        /// Encrypted .rayconfig file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Export password
        #[arg(short, long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,

        /// Output file (defaults to <FILE>.json)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Encrypt config JSON into a .rayconfig export
    Encrypt {
        /// Decrypted config JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Export password
        #[arg(short, long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,

        /// Output file (defaults to <FILE> with a .rayconfig extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Write every note in a config as a Markdown file
    ///
    /// Notes that are skipped or fail to export are listed in the summary
    /// and do not change the exit status.
    #[command(alias = "notes")]
    ParseNotes {
        /// Encrypted .rayconfig file or decrypted JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Export password (only needed for encrypted input)
        #[arg(short, long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = rayconfig::export::DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Render notes one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decrypt {
            input,
            password,
            output,
        } => cmd_decrypt(&input, &password, output.as_deref()),
        Commands::Encrypt {
            input,
            password,
            output,
        } => cmd_encrypt(&input, &password, output.as_deref()),
        Commands::ParseNotes {
            input,
            password,
            output,
            sequential,
        } => cmd_parse_notes(&input, password.as_deref(), &output, sequential),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_decrypt(
    input: &Path,
    password: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = decrypt_file(input, password)?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| decrypted_path(input));
    fs::write(&path, json)?;
    println!("{} {}", "Saved to".green(), path.display());

    Ok(())
}

fn cmd_encrypt(
    input: &Path,
    password: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read(input)?;
    ensure_json(&json)?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| encrypted_path(input));
    fs::write(&path, encrypt_bytes(&json, password)?)?;
    println!("{} {}", "Saved to".green(), path.display());

    Ok(())
}

fn cmd_parse_notes(
    input: &Path,
    password: Option<&str>,
    output: &Path,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if detect_format_from_path(input)? == InputFormat::Encrypted && password.is_none() {
        return Err(format!(
            "{} is encrypted; pass --password or set {}",
            input.display(),
            PASSWORD_ENV
        )
        .into());
    }

    let config = load_config(input, password)?;
    let notes = config.require_notes()?;
    log::debug!("Loaded {} notes from {}", notes.len(), input.display());

    let options = ExportOptions::new()
        .with_output_dir(output)
        .with_parallel(!sequential);
    let exporter = NoteExporter::new(options);

    let pb = ProgressBar::new(notes.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Rendering notes...");

    let report = exporter.export_with(&notes, |_| pb.inc(1))?;
    pb.finish_with_message("Done!");

    for result in &report.results {
        match &result.outcome {
            NoteOutcome::Saved(_) => {}
            NoteOutcome::Skipped(reason) => {
                println!("{} {}", "Skipped".yellow(), reason);
            }
            NoteOutcome::Failed(e) => {
                println!("{} {}: {}", "Failed".red(), result.title, e);
            }
        }
    }

    println!(
        "\n{} {} notes saved to {}",
        "Done!".green().bold(),
        report.saved_count(),
        output.display()
    );
    if report.skipped_count() > 0 {
        println!("  {} {} skipped", "├─".dimmed(), report.skipped_count());
    }
    if report.failed_count() > 0 {
        println!("  {} {} failed", "└─".dimmed(), report.failed_count());
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "rayconfig".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Raycast config decryption and note export tool");
}

/// Reject input that is not JSON before encrypting it.
fn ensure_json(json: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    let config = rayconfig::RayConfig::from_json_bytes(json);
    config.json()?;
    Ok(())
}

/// `<input>.json` next to the input file.
fn decrypted_path(input: &Path) -> PathBuf {
    let mut name: OsString = input.as_os_str().to_owned();
    name.push(".json");
    PathBuf::from(name)
}

/// The input path with `.rayconfig` in place of `.json`.
///
/// `Raycast.rayconfig.json`, as written by `decrypt`, maps back to
/// `Raycast.rayconfig`.
fn encrypted_path(input: &Path) -> PathBuf {
    let stem = input.with_extension("");
    if stem.extension().is_some_and(|ext| ext == "rayconfig") {
        stem
    } else {
        input.with_extension("rayconfig")
    }
}

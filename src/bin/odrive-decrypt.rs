//! odrive-decrypt: decrypt odrive Encryptor files and folders
//!
//!   odrive-decrypt -i <encrypted file or folder> -o <destination folder>
//!
//! The passphrase comes from `--passphrase`, `ODRIVE_PASSPHRASE`, or an
//! interactive prompt. Exit status: 0 on success, 1 if any item failed,
//! 2 on bad arguments.

use anyhow::{Context, Result};
use clap::Parser;
use odrivecrypt_rs::aliases::PasswordString;
use odrivecrypt_rs::decrypt_tree;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "odrive-decrypt",
    version,
    about = "Decrypt files and folders encrypted by odrive's Encryptor"
)]
struct Cli {
    /// Encryptor passphrase (prompted for when absent)
    #[arg(long, visible_alias = "pass", env = "ODRIVE_PASSPHRASE", hide_env_values = true)]
    passphrase: Option<String>,

    /// Encrypted file or folder
    #[arg(short = 'i', long = "in", value_name = "PATH")]
    input: PathBuf,

    /// Destination folder (must already exist)
    #[arg(short = 'o', long = "out", value_name = "DIR")]
    output: PathBuf,

    /// List items as they are decrypted
    #[arg(short, long)]
    verbose: bool,

    /// Do not report per-item errors (wins over --verbose)
    #[arg(short, long)]
    quiet: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("odrive-decrypt: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn log_level(cli: &Cli) -> &'static str {
    if cli.quiet {
        "error"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    }
}

fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(cli)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(mut cli: Cli) -> Result<ExitCode> {
    validate_paths(&cli.input, &cli.output)?;
    // Moved, not copied: the PasswordString is the only live copy
    let password = read_passphrase(cli.passphrase.take())?;

    let report = decrypt_tree(&cli.input, &cli.output, &password).with_context(|| {
        format!(
            "decrypting {} into {}",
            cli.input.display(),
            cli.output.display()
        )
    })?;

    if !cli.quiet {
        eprintln!(
            "{} file(s), {} folder(s) decrypted, {} failure(s)",
            report.files,
            report.folders,
            report.failures.len()
        );
    }

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

// ── Argument checks ───────────────────────────────────────────────────────────

fn validate_paths(input: &Path, output: &Path) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("input {} does not exist", input.display());
    }
    let meta = std::fs::metadata(output)
        .with_context(|| format!("output folder {}", output.display()))?;
    if !meta.is_dir() {
        anyhow::bail!("output {} is not a folder", output.display());
    }
    Ok(())
}

fn read_passphrase(given: Option<String>) -> Result<PasswordString> {
    let passphrase = match given {
        Some(p) => p,
        None => rpassword::prompt_password("Passphrase: ").context("reading passphrase")?,
    };
    Ok(PasswordString::new(passphrase))
}

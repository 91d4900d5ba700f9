#![deny(unsafe_code)]

//! `psafe3` - dump and verify a Password Safe v3 vault.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use psafe3::{decrypt_vault, Container, DecryptOptions, ErrorKind, FieldValue, Psafe3Error, RustCrypto};

mod exit_code {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL: u8 = 1;
    pub const INVALID_PASSPHRASE: u8 = 2;
    pub const FORMAT: u8 = 3;
    pub const INTEGRITY: u8 = 4;
    pub const PRIMITIVE_SETUP: u8 = 5;
}

/// Decrypt a Password Safe v3 vault, print its fields and verify its HMAC
#[derive(Parser)]
#[command(name = "psafe3")]
#[command(author, version)]
#[command(after_help = "EXAMPLES:
    # Prompt for the passphrase
    psafe3 ~/passwords.psafe3

    # Pipe the passphrase from a secret manager
    echo \"$SECRET\" | psafe3 --password-stdin ~/passwords.psafe3
")]
struct Cli {
    /// Path to the .psafe3 file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Vault passphrase (insecure, prefer --password-stdin or PSAFE3_PASSWORD)
    #[arg(long, env = "PSAFE3_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Read passphrase from stdin (single line)
    #[arg(long, conflicts_with = "password")]
    password_stdin: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::from(exit_code::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(categorize_error(&e))
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let container = Container::open(&cli.file)
        .with_context(|| format!("Failed to read vault {}", cli.file.display()))?;
    let passphrase = get_passphrase(&cli)?;
    let options = DecryptOptions::default();

    let vault = match decrypt_vault(&container, passphrase.as_bytes(), &options, &RustCrypto) {
        Ok(vault) => vault,
        Err(Psafe3Error::IntegrityFailure { computed, stored }) => {
            eprintln!("HMAC'  {}", hex::encode(computed));
            eprintln!("HMAC   {}", hex::encode(stored));
            return Err(Psafe3Error::IntegrityFailure { computed, stored }.into());
        }
        Err(e) => return Err(e.into()),
    };

    let mut out = io::stdout().lock();
    for field in vault.fields() {
        write!(out, "len={:<3}  type={:02x}  ", field.len(), field.tag)?;
        match field.value() {
            FieldValue::Unknown(_) => {}
            value => write!(out, "{value}")?,
        }
        writeln!(out)?;
    }
    writeln!(out)?;

    let prologue = vault.header().prologue();
    let report = vault.report().lines();
    for (label, value) in prologue.iter().chain(report.iter()) {
        writeln!(out, "{label:<6} {value}")?;
    }
    Ok(())
}

/// Passphrase priority: --password-stdin, --password / PSAFE3_PASSWORD, prompt
fn get_passphrase(cli: &Cli) -> Result<Zeroizing<String>> {
    if cli.password_stdin {
        read_password_from_stdin()
    } else if let Some(ref password) = cli.password {
        Ok(Zeroizing::new(password.clone()))
    } else {
        let password = rpassword::prompt_password("Vault passphrase: ")
            .context("Failed to read passphrase")?;
        Ok(Zeroizing::new(password))
    }
}

/// Read passphrase from stdin (first line only)
fn read_password_from_stdin() -> Result<Zeroizing<String>> {
    if io::stdin().is_terminal() {
        anyhow::bail!(
            "--password-stdin requires the passphrase to be piped in.\n\
             Example: echo \"$SECRET\" | psafe3 --password-stdin vault.psafe3"
        );
    }

    let mut line = Zeroizing::new(String::new());
    io::stdin().read_line(&mut line)?;
    let trimmed = line.trim_end_matches('\n').trim_end_matches('\r');
    Ok(Zeroizing::new(trimmed.to_string()))
}

/// Set up tracing/logging based on verbosity level
fn setup_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();
}

/// Map the first vault error in the chain to an exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    e.chain()
        .find_map(|cause| cause.downcast_ref::<Psafe3Error>())
        .map_or(exit_code::GENERAL, |err| match err.kind() {
            ErrorKind::Io => exit_code::GENERAL,
            ErrorKind::InvalidPassphrase => exit_code::INVALID_PASSPHRASE,
            ErrorKind::Format => exit_code::FORMAT,
            ErrorKind::IntegrityFailure => exit_code::INTEGRITY,
            ErrorKind::PrimitiveSetup => exit_code::PRIMITIVE_SETUP,
        })
}

//! # CLI Interface
//!
//! Defines the command-line argument structure for `accu-signer` using
//! `clap` derive. Supports four subcommands: `keygen`, `sign`, `encode`,
//! and `version`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use accu_protocol::crypto::Algorithm;

use crate::logging::LogFormat;

/// Offline transaction signer.
///
/// Builds the binary encoding of a transaction body, derives its hashes and
/// signs it with an ed25519, rcd1, btc or eth key. Nothing is sent anywhere:
/// the signed envelope is printed as JSON on stdout.
#[derive(Parser, Debug)]
#[command(
    name = "accu-signer",
    about = "Offline transaction signer",
    version,
    propagate_version = true
)]
pub struct AccuSignerCli {
    /// Log output format: pretty or json. Logs go to stderr.
    #[arg(long, global = true, env = "ACCU_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a key and print its public key, key hash and lite URLs.
    Keygen(KeygenArgs),
    /// Sign a JSON transaction body and print the envelope.
    Sign(SignArgs),
    /// Print the binary encoding of a JSON body and its body hash.
    Encode(EncodeArgs),
    /// Print version information and exit.
    Version,
}

#[derive(Parser, Debug)]
pub struct KeygenArgs {
    #[arg(long, short = 'a', env = "ACCU_ALGORITHM", default_value = "ed25519")]
    pub algorithm: Algorithm,
}

#[derive(Parser, Debug)]
pub struct SignArgs {
    #[arg(long, short = 'a', env = "ACCU_ALGORITHM", default_value = "ed25519")]
    pub algorithm: Algorithm,

    /// Hex-encoded 32-byte secret key.
    ///
    /// Prefer the environment variable over the flag so the key stays out
    /// of shell history.
    #[arg(long, env = "ACCU_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Account the transaction acts on.
    #[arg(long)]
    pub principal: String,

    /// Key page that signs.
    #[arg(long)]
    pub signer: String,

    #[arg(long, default_value_t = 1)]
    pub signer_version: u64,

    #[arg(long)]
    pub memo: Option<String>,

    /// Signature timestamp in microseconds. Defaults to now.
    #[arg(long)]
    pub timestamp: Option<u64>,

    /// JSON body file, or `-` for stdin.
    #[arg(long, short = 'b', default_value = "-")]
    pub body: PathBuf,
}

#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// JSON body file, or `-` for stdin.
    #[arg(long, short = 'b', default_value = "-")]
    pub body: PathBuf,
}

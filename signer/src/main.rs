// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Accu Signer
//!
//! Entry point for the `accu-signer` binary. Parses CLI arguments,
//! initializes logging, and runs one of four subcommands:
//!
//! - `keygen`  — generate a key and print its lite identity
//! - `sign`    — sign a JSON body and print the envelope
//! - `encode`  — print a body's binary encoding and hash
//! - `version` — print build version information
//!
//! Results are JSON on stdout. Logs go to stderr.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use std::io::Read;
use std::path::Path;

use accu_protocol::codec::ExtendedEncoder;
use accu_protocol::crypto::{Algorithm, KeyPair};
use accu_protocol::transaction::{
    apply_padding, body_hash, SignedTransaction, SigningRequest, TransactionBody,
    TransactionSigner,
};

use cli::{AccuSignerCli, Commands};

fn main() -> Result<()> {
    let cli = AccuSignerCli::parse();
    logging::init_logging(logging::DEFAULT_FILTER, cli.log_format);

    let output = match cli.command {
        Commands::Keygen(args) => keygen(args.algorithm),
        Commands::Sign(args) => sign(args)?,
        Commands::Encode(args) => encode(&read_body(&args.body)?)?,
        Commands::Version => {
            print_version();
            return Ok(());
        }
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("failed to serialize output")?
    );
    Ok(())
}

/// Generates a fresh key. The secret is printed once and never stored.
fn keygen(algorithm: Algorithm) -> Value {
    let key = KeyPair::generate(algorithm);
    tracing::info!(%algorithm, "key generated");
    let mut report = key_report(&key);
    report["secretKey"] = json!(hex::encode(key.secret_key_bytes()));
    report
}

fn key_report(key: &KeyPair) -> Value {
    let lite = key.lite_identity();
    json!({
        "algorithm": key.algorithm(),
        "publicKey": hex::encode(key.public_key_bytes()),
        "keyHash": hex::encode(key.key_hash()),
        "liteIdentity": lite.url(),
        "liteTokenAccount": lite.token_account(),
    })
}

fn sign(args: cli::SignArgs) -> Result<Value> {
    let key = KeyPair::from_hex(args.algorithm, args.secret_key.trim())
        .with_context(|| format!("failed to load {} secret key", args.algorithm))?;
    let body = read_body(&args.body)?;

    let mut request = SigningRequest::new(args.principal, args.signer, body)
        .signer_version(args.signer_version);
    if let Some(memo) = args.memo {
        request = request.memo(memo);
    }
    if let Some(timestamp) = args.timestamp {
        request = request.timestamp(timestamp);
    }

    let signed = TransactionSigner::new()
        .sign(&key, request)
        .context("failed to sign transaction")?;
    tracing::info!(
        transaction_hash = %hex::encode(signed.hashes.transaction),
        padded = signed.padded,
        "transaction signed"
    );
    sign_report(&signed)
}

fn sign_report(signed: &SignedTransaction) -> Result<Value> {
    Ok(json!({
        "envelope": serde_json::to_value(&signed.envelope).context("failed to serialize envelope")?,
        "transactionHash": hex::encode(signed.hashes.transaction),
        "padded": signed.padded,
    }))
}

/// Encodes `body` as it would be signed, padding included.
fn encode(body: &TransactionBody) -> Result<Value> {
    let encoder = ExtendedEncoder::new();
    let padded = apply_padding(&encoder, body.clone()).context("failed to encode body")?;
    let hash = body_hash(&encoder, &padded.body, &padded.encoded).context("failed to hash body")?;
    Ok(json!({
        "type": padded.body.transaction_type(),
        "encoded": hex::encode(&padded.encoded),
        "length": padded.encoded.len(),
        "padded": padded.padded,
        "bodyHash": hex::encode(hash),
    }))
}

/// Reads a JSON body from `path`, or from stdin when `path` is `-`.
fn read_body(path: &Path) -> Result<TransactionBody> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read body from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read body from {}", path.display()))?
    };
    parse_body(&text)
}

fn parse_body(text: &str) -> Result<TransactionBody> {
    serde_json::from_str(text).context("invalid transaction body JSON")
}

/// Prints version information to stdout.
fn print_version() {
    println!("accu-signer {}", env!("CARGO_PKG_VERSION"));
    let algorithms: Vec<_> = Algorithm::ALL.iter().map(|a| a.name()).collect();
    println!("algorithms  {}", algorithms.join(", "));
    println!("rustc       {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}

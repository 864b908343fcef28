//! x25519 keypair derivation via the external proxy binary.
//!
//! Key material is never produced here. The delegate is invoked as
//! `<binary> x25519` for fresh generation, or `<binary> x25519 -i <key>` to
//! re-derive the public half from a stored private key, and its two labeled
//! output lines are parsed into a [`Keypair`].

use std::path::Path;

use regex::Regex;
use tokio::process::Command;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Keypair {
    pub private: String,
    pub public: String,
}

pub async fn derive(binary: &Path, private_key: &str) -> Result<Keypair> {
    let mut cmd = Command::new(binary);
    cmd.arg("x25519");
    if !private_key.is_empty() {
        cmd.arg("-i").arg(private_key);
    }
    log::debug!("invoking {} x25519", binary.display());
    let output = cmd.output().await.map_err(|e| {
        Error::KeychainDelegate(format!("could not run {}: {}", binary.display(), e))
    })?;
    if !output.status.success() {
        return Err(Error::KeychainDelegate(format!(
            "{} exited with {}",
            binary.display(),
            output.status
        )));
    }
    parse_output(&String::from_utf8_lossy(&output.stdout))
}

/// Two lines of `LABEL: VALUE`, private first then public, in the order the
/// delegate prints them. Anything else is a delegate error, never a
/// half-filled keypair.
pub fn parse_output(stdout: &str) -> Result<Keypair> {
    let label_re = Regex::new(r"(?m): (.+?)$").expect("keychain label pattern");
    let values: Vec<&str> = label_re
        .captures_iter(stdout.trim())
        .map(|cap| cap.get(1).expect("capture group 1").as_str())
        .collect();
    match values.as_slice() {
        [private, public] => Ok(Keypair {
            private: private.to_string(),
            public: public.to_string(),
        }),
        _ => Err(Error::KeychainDelegate(format!(
            "expected two labeled output lines, saw {}",
            values.len()
        ))),
    }
}

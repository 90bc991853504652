//! Persistence of partial counters, so that long partitioned runs can be resumed.

use std::fs;
use std::path::Path;

use bitcode::{Decode, Encode};
use eyre::{ensure, eyre, Result, WrapErr};

const MAGIC: &[u8; 8] = b"SVBITCK1";

pub fn encode<T: Encode + ?Sized>(value: &T) -> Vec<u8> {
    let payload = bitcode::encode(value);
    let mut bytes = Vec::with_capacity(MAGIC.len() + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&payload);
    bytes
}

pub fn decode<T>(bytes: &[u8]) -> Result<T>
where
    T: for<'a> Decode<'a>,
{
    ensure!(
        bytes.len() >= MAGIC.len() && &bytes[..MAGIC.len()] == MAGIC,
        "Not an svbit checkpoint"
    );
    bitcode::decode(&bytes[MAGIC.len()..]).map_err(|err| eyre!("Corrupted checkpoint: {err}"))
}

pub fn dump<T: Encode + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, encode(value))
        .wrap_err_with(|| format!("Failed to write checkpoint {}", path.display()))?;
    log::debug!("Checkpoint saved to {}", path.display());
    Ok(())
}

pub fn load<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: for<'a> Decode<'a>,
{
    let path = path.as_ref();
    let bytes =
        fs::read(path).wrap_err_with(|| format!("Failed to read checkpoint {}", path.display()))?;
    decode(&bytes).wrap_err_with(|| format!("Invalid checkpoint {}", path.display()))
}

//! Use this instead of raw bincode to write save data - frames the encoded
//! bytes with lz4 compression.

use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};

/// Encodes + compresses a value for writing to disk
pub fn serialize<T: Serialize>(x: &T) -> anyhow::Result<Vec<u8>> {
    let data = bincode::serde::encode_to_vec(x, bincode::config::standard()).context("failed to encode save data")?;

    Ok(lz4_flex::compress_prepend_size(&data))
}

/// Decompresses + decodes a value previously written with [`serialize`]
pub fn deserialize<T: DeserializeOwned>(raw: &[u8]) -> anyhow::Result<T> {
    let decompressed = lz4_flex::decompress_size_prepended(raw).context("unable to decompress save data")?;

    let (value, _) = bincode::serde::decode_from_slice(&decompressed, bincode::config::standard())
        .context("failed to decode save data")?;

    Ok(value)
}

//! # Snapshot — Versioned Binary Container
//!
//! Layout:
//!
//! ```text
//! ┌──────┬─────────┬───────┬──────────────────────────────┐
//! │ magic│ version │ flags │ bincode body                 │
//! │ ARTS │ u16 LE  │ u8    │ params + categories + counter│
//! └──────┴─────────┴───────┴──────────────────────────────┘
//! ```
//!
//! Flag bit 0 is reserved for gzip compression; the writer always emits 0
//! and readers refuse any set flag. Readers verify magic and version before
//! touching the body and refuse unknown versions.

use serde::{Deserialize, Serialize};

use crate::category::FuzzyCategory;
use crate::engine::FuzzyArt;
use crate::error::{FuzzyError, FuzzyResult};
use crate::params::FuzzyParams;

/// Container magic tag
pub const MAGIC: [u8; 4] = *b"ARTS";

/// Current container version
pub const VERSION: u16 = 1;

/// Reserved compression flag
pub const FLAG_GZIP: u8 = 0b0000_0001;

const HEADER_LEN: usize = 7;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotBody {
    params: FuzzyParams,
    categories: Vec<FuzzyCategory>,
    learn_count: u64,
}

/// Serialize the engine's learned state
pub fn save_categories(engine: &FuzzyArt) -> FuzzyResult<Vec<u8>> {
    let body = SnapshotBody {
        params: engine.params().clone(),
        categories: engine.get_categories().to_vec(),
        learn_count: engine.learn_count(),
    };
    let encoded =
        bincode::serialize(&body).map_err(|e| FuzzyError::SnapshotCodec(e.to_string()))?;

    let mut out = Vec::with_capacity(HEADER_LEN + encoded.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.push(0); // no flags
    out.extend_from_slice(&encoded);
    Ok(out)
}

/// Rebuild an engine from a snapshot. The RNG restarts from the stored
/// seed, so a restored engine replays deterministically.
pub fn load_categories(bytes: &[u8]) -> FuzzyResult<FuzzyArt> {
    if bytes.len() < HEADER_LEN {
        return Err(FuzzyError::SnapshotTruncated {
            need: HEADER_LEN,
            have: bytes.len(),
        });
    }
    if bytes[..4] != MAGIC {
        return Err(FuzzyError::BadMagic);
    }
    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != VERSION {
        return Err(FuzzyError::UnsupportedVersion(version));
    }
    let flags = bytes[6];
    if flags != 0 {
        return Err(FuzzyError::UnsupportedFlags(flags));
    }

    let body: SnapshotBody = bincode::deserialize(&bytes[HEADER_LEN..])
        .map_err(|e| FuzzyError::SnapshotCodec(e.to_string()))?;
    FuzzyArt::from_parts(body.params, body.categories, body.learn_count)
}

// src/watch/hash.rs

use blake3::Hasher;
use tracing::debug;

/// Hex blake3 digest of a byte buffer.
pub fn content_hash(contents: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(contents);
    hasher.finalize().to_hex().to_string()
}

/// Remembers the digest of the last accepted contents.
#[derive(Debug, Default)]
pub struct ContentGate {
    last: Option<String>,
}

impl ContentGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` (and remember the digest) if `contents` differ from the last
    /// accepted contents.
    pub fn admit(&mut self, contents: &[u8]) -> bool {
        let hash = content_hash(contents);
        if self.last.as_deref() == Some(hash.as_str()) {
            debug!(hash = %hash, "plan contents unchanged; skipping");
            return false;
        }
        self.last = Some(hash);
        true
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

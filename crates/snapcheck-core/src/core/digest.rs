// crates/snapcheck-core/src/core/digest.rs
// ============================================================================
// Module: Snapcheck Content Digests
// Description: Canonical JSON fingerprints of recorded content.
// Purpose: Make fixture drift identifiable from verification reports alone.
// Dependencies: serde, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! Verification reports carry a digest of the recorded content they compared
//! against. Content is canonicalized with RFC 8785 (JCS) before hashing so
//! the fingerprint is independent of key order and whitespace.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when fingerprinting recorded content.
#[derive(Debug, Error)]
pub enum DigestError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize content: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Digest Types
// ============================================================================

/// Digest algorithms supported for content fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestAlgorithm {
    /// SHA-256 over JCS canonical bytes.
    Sha256,
}

/// A content fingerprint: algorithm plus lowercase hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDigest {
    /// Digest algorithm identifier.
    pub algorithm: DigestAlgorithm,
    /// Lowercase hex-encoded digest bytes.
    pub value: String,
}

impl ContentDigest {
    /// Fingerprints a serializable value over its JCS canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Canonicalization`] when the value cannot be
    /// rendered as canonical JSON.
    pub fn of_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<Self, DigestError> {
        let bytes =
            serde_jcs::to_vec(value).map_err(|err| DigestError::Canonicalization(err.to_string()))?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(Self {
            algorithm: DigestAlgorithm::Sha256,
            value: hex_encode(&hasher.finalize()),
        })
    }
}

// ============================================================================
// SECTION: Hex Encoding
// ============================================================================

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

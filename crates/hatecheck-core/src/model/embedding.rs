use sha2::{Digest, Sha256};

use super::Embedder;
use crate::error::{HatecheckError, Result};

/// Feature-hashing sentence vectorizer
///
/// Every whitespace token is hashed with SHA-256 into a bucket and a sign.
/// Bucket values are summed and the vector is L2-normalized, so sentences
/// of different lengths land on the same scale. Text with no tokens maps to
/// the zero vector.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(HatecheckError::invalid_value("embedding dimension", dim));
        }
        Ok(HashingEmbedder { dim })
    }

    fn bucket(&self, token: &str) -> (usize, f32) {
        let digest = Sha256::digest(token.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        let index = (u64::from_le_bytes(bytes) % self.dim as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        (index, sign)
    }
}

impl Embedder for HashingEmbedder {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dim];
        for token in text.split_whitespace() {
            let (index, sign) = self.bucket(token);
            vector[index] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

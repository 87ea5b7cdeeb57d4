//! Deterministic hash-based embedding provider.
//!
//! Builds content-aware vectors from word and character-trigram frequencies.
//! No network, no model weights; deterministic for identical input. Useful
//! as an offline default and in tests, not a substitute for neural
//! embeddings in production.

use crate::embeddings::EmbeddingProvider;
use grounded_core::AppResult;
use std::collections::{HashMap, HashSet};

/// Default embedding dimension, matching common sentence-embedding models.
const DEFAULT_DIMENSIONS: usize = 384;

/// Common words filtered out before hashing, for better discrimination.
const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were", "for", "to", "of",
    "in", "and", "or", "but", "with", "by", "from", "this", "that", "be", "have", "has", "had",
    "it", "its", "their", "they", "them",
];

/// Deterministic trigram-hash embedder.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_sync(&self, text: &str) -> Vec<f32> {
        let dim = self.dimensions;
        let mut embedding = vec![0.0f32; dim];

        let stop_words: HashSet<&str> = STOP_WORDS.iter().copied().collect();
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split_whitespace()
            .filter(|w| !stop_words.contains(w) && w.len() > 2)
            .collect();

        let mut word_freq: HashMap<&str, u32> = HashMap::new();
        for word in &words {
            *word_freq.entry(*word).or_insert(0) += 1;
        }

        // Map each word to several dimensions via character trigrams, plus
        // one dimension for the whole word
        for (word, freq) in &word_freq {
            let chars: Vec<char> = word.chars().collect();
            for i in 0..chars.len().saturating_sub(2) {
                let trigram = format!("{}{}{}", chars[i], chars[i + 1], chars[i + 2]);
                let trigram_hash = trigram
                    .bytes()
                    .fold(0u64, |acc, b| acc.wrapping_mul(37).wrapping_add(b as u64));
                embedding[(trigram_hash as usize) % dim] += (*freq as f32).sqrt();
            }

            let word_hash = word
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            embedding[(word_hash as usize) % dim] += *freq as f32;
        }

        // Normalize to a unit vector
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut embedding {
                *v /= norm;
            }
        }

        embedding
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for HashEmbedder {
    fn provider_name(&self) -> &str {
        "hash"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        Ok(self.embed_sync(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[tokio::test]
    async fn test_deterministic_for_identical_input() {
        let embedder = HashEmbedder::default();
        let a = embedder.embed("the quick brown fox").await.unwrap();
        let b = embedder.embed("the quick brown fox").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), DEFAULT_DIMENSIONS);
    }

    #[tokio::test]
    async fn test_unit_norm() {
        let embedder = HashEmbedder::default();
        let v = embedder.embed("normalization check").await.unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn test_similar_text_scores_higher_than_unrelated() {
        let embedder = HashEmbedder::default();
        let query = embedder.embed("rust borrow checker ownership").await.unwrap();
        let related = embedder
            .embed("ownership and the borrow checker in rust")
            .await
            .unwrap();
        let unrelated = embedder
            .embed("pancake recipes flour butter syrup")
            .await
            .unwrap();

        assert!(cosine(&query, &related) > cosine(&query, &unrelated));
    }

    #[tokio::test]
    async fn test_empty_text_embeds_to_zero_vector() {
        let embedder = HashEmbedder::default();
        let v = embedder.embed("").await.unwrap();
        assert!(v.iter().all(|x| *x == 0.0));
    }
}

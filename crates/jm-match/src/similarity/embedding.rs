//! Dense similarity: sentence embeddings compared by cosine.

use tracing::debug;

use super::{Scorer, Strategy, cosine};
use crate::{EmbedError, MatchError};

/// A sentence embedding model.
pub trait Embedder: Send + Sync {
    /// Model identifier, for logs and reports.
    fn model_name(&self) -> &str;

    /// Width of the vectors this model produces.
    fn dimension(&self) -> usize;

    /// Embeds each text, returning one vector per input in input order.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError>;
}

impl<E: Embedder + ?Sized> Embedder for &E {
    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        (**self).embed(texts)
    }
}

/// Scores by cosine similarity between the query embedding and each corpus embedding.
///
/// The corpus is embedded in batches of `batch_size`. Batch boundaries do not change scores.
#[derive(Debug, Clone)]
pub struct EmbeddingScorer<E> {
    /// Model used for both query and corpus.
    embedder: E,
    /// Texts per `embed` call.
    batch_size: usize,
}

impl<E: Embedder> EmbeddingScorer<E> {
    /// Creates a scorer. A batch size of zero is treated as one.
    pub fn new(embedder: E, batch_size: usize) -> Self {
        Self {
            embedder,
            batch_size: batch_size.max(1),
        }
    }

    /// The wrapped model.
    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Embeds `texts` in batches and checks the shape of the result.
    fn embed_all(&self, texts: &[&str], expected: usize) -> Result<Vec<Vec<f32>>, MatchError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size) {
            let embedded = self.embedder.embed(batch)?;
            if embedded.len() != batch.len() {
                return Err(EmbedError::Inference(format!(
                    "model returned {} embeddings for {} texts",
                    embedded.len(),
                    batch.len()
                ))
                .into());
            }
            if let Some(bad) = embedded.iter().find(|v| v.len() != expected) {
                return Err(MatchError::DimensionMismatch {
                    expected,
                    actual: bad.len(),
                });
            }
            vectors.extend(embedded);
        }
        Ok(vectors)
    }
}

impl<E: Embedder> Scorer for EmbeddingScorer<E> {
    fn strategy(&self) -> Strategy {
        Strategy::Embedding
    }

    fn score(&self, query: &str, corpus: &[&str]) -> Result<Vec<f32>, MatchError> {
        if corpus.is_empty() {
            return Ok(Vec::new());
        }
        if query.trim().is_empty() {
            return Ok(vec![0.0; corpus.len()]);
        }

        let query_vector = self
            .embedder
            .embed(&[query])?
            .into_iter()
            .next()
            .ok_or_else(|| EmbedError::Inference("model returned no query embedding".into()))?;
        let expected = query_vector.len();

        debug!(
            model = self.embedder.model_name(),
            documents = corpus.len(),
            batch_size = self.batch_size,
            "embedding corpus"
        );
        let vectors = self.embed_all(corpus, expected)?;
        Ok(vectors.iter().map(|v| cosine(&query_vector, v)).collect())
    }
}

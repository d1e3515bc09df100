//! BERT sentence embeddings on Candle.
//!
//! Model files come from the Hugging Face hub and are cached on disk. Sentence vectors are the
//! attention-masked mean of the last hidden state, L2 normalized.

use std::{fmt, fs, iter, path::PathBuf, sync::OnceLock};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use hf_hub::api::sync::ApiBuilder;
use jm_config::EmbeddingSettings;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

use super::Embedder;
use crate::EmbedError;

/// Maximum tokens per text; longer input is truncated.
const MAX_TOKENS: usize = 512;

/// Process-wide model, loaded on first use.
static SHARED: OnceLock<Result<CandleEmbedder, EmbedError>> = OnceLock::new();

/// Returns the process-wide embedder, loading it on first call.
///
/// Loading is attempted at most once; concurrent callers wait for the first load and every
/// caller sees the same model or the same error. Settings from the first call win.
pub fn shared_embedder(
    settings: &EmbeddingSettings,
) -> Result<&'static CandleEmbedder, EmbedError> {
    SHARED
        .get_or_init(|| CandleEmbedder::load(settings))
        .as_ref()
        .map_err(Clone::clone)
}

/// Wraps a load failure.
fn load_error(what: &str, e: &dyn fmt::Display) -> EmbedError {
    EmbedError::ModelLoad(format!("{what}: {e}"))
}

/// Wraps an inference failure.
fn inference(e: candle_core::Error) -> EmbedError {
    EmbedError::Inference(e.to_string())
}

/// A BERT-family sentence encoder.
pub struct CandleEmbedder {
    /// Hub identifier of the loaded model.
    model_id: String,
    /// Device inference runs on.
    device: Device,
    /// Encoder weights.
    model: BertModel,
    /// Tokenizer with truncation configured.
    tokenizer: Tokenizer,
    /// Hidden size of the model.
    dimension: usize,
    /// Token used to pad short sequences.
    pad_id: u32,
}

impl fmt::Debug for CandleEmbedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandleEmbedder")
            .field("model_id", &self.model_id)
            .field("device", &self.device)
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl CandleEmbedder {
    /// Downloads (if needed) and loads the configured model.
    pub fn load(settings: &EmbeddingSettings) -> Result<Self, EmbedError> {
        let device = Device::cuda_if_available(0).unwrap_or(Device::Cpu);
        info!(model = %settings.model, ?device, "loading embedding model");

        let mut builder = ApiBuilder::from_env();
        if let Some(cache_dir) = &settings.cache_dir {
            builder = builder.with_cache_dir(cache_dir.clone());
        }
        let api = builder
            .build()
            .map_err(|e| load_error("failed to create hub client", &e))?;
        let repo = api.model(settings.model.clone());

        let fetch = |file: &str| -> Result<PathBuf, EmbedError> {
            debug!(file, "fetching model file");
            repo.get(file)
                .map_err(|e| load_error(&format!("failed to download {file}"), &e))
        };
        let tokenizer_path = fetch("tokenizer.json")?;
        let config_path = fetch("config.json")?;
        let weights_path = fetch("model.safetensors")?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| load_error("failed to load tokenizer", &e))?;
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| load_error("failed to configure truncation", &e))?;

        let config_json = fs::read_to_string(&config_path)
            .map_err(|e| load_error("failed to read model config", &e))?;
        let config: Config = serde_json::from_str(&config_json)
            .map_err(|e| load_error("failed to parse model config", &e))?;

        // SAFETY: the weights file is not modified while mapped; the hub cache only ever
        // replaces files by renaming new ones into place.
        #[allow(unsafe_code)]
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(|e| load_error("failed to map weights", &e))?
        };
        let model =
            BertModel::load(vb, &config).map_err(|e| load_error("failed to build model", &e))?;

        Ok(Self {
            model_id: settings.model.clone(),
            device,
            model,
            tokenizer,
            dimension: config.hidden_size,
            pad_id: u32::try_from(config.pad_token_id).unwrap_or(0),
        })
    }

    /// Encodes one batch into unit vectors.
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbedError::Inference(format!("tokenization failed: {e}")))?;

        let width = encodings.iter().map(|e| e.len()).max().unwrap_or(0).max(1);
        let rows = encodings.len();
        let mut ids = Vec::with_capacity(rows * width);
        let mut mask = Vec::with_capacity(rows * width);
        for encoding in &encodings {
            let padding = width - encoding.len();
            ids.extend_from_slice(encoding.get_ids());
            ids.extend(iter::repeat_n(self.pad_id, padding));
            mask.extend_from_slice(encoding.get_attention_mask());
            mask.extend(iter::repeat_n(0, padding));
        }

        let input_ids = Tensor::from_vec(ids, (rows, width), &self.device).map_err(inference)?;
        let attention_mask =
            Tensor::from_vec(mask, (rows, width), &self.device).map_err(inference)?;
        let token_type_ids = input_ids.zeros_like().map_err(inference)?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(inference)?;
        let pooled = mean_pool(&hidden, &attention_mask).map_err(inference)?;
        let normalized = l2_normalize(&pooled).map_err(inference)?;
        normalized.to_vec2::<f32>().map_err(inference)
    }
}

/// Averages token vectors over unmasked positions.
fn mean_pool(hidden: &Tensor, attention_mask: &Tensor) -> candle_core::Result<Tensor> {
    let mask = attention_mask
        .to_dtype(DType::F32)?
        .unsqueeze(2)?
        .broadcast_as(hidden.shape())?;
    let summed = hidden.mul(&mask)?.sum(1)?;
    let counts = mask.sum(1)?.clamp(1e-9, f64::MAX)?;
    summed.div(&counts)
}

/// Scales each row to unit length.
fn l2_normalize(embeddings: &Tensor) -> candle_core::Result<Tensor> {
    let norm = embeddings
        .sqr()?
        .sum_keepdim(1)?
        .sqrt()?
        .clamp(1e-12, f64::MAX)?;
    embeddings.broadcast_div(&norm)
}

impl Embedder for CandleEmbedder {
    fn model_name(&self) -> &str {
        &self.model_id
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.encode_batch(texts)
    }
}

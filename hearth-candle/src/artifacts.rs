//! Model artifact resolution
//!
//! A model identifier is either a local directory or a Hugging Face repo
//! id. Either way the backend needs two files: the GGUF weights and the
//! `tokenizer.json`.

use std::path::{Path, PathBuf};

use hearth::{Error, Result};

/// Weights file fetched from a hub repo when no local directory is given.
const DEFAULT_WEIGHTS_FILE: &str = "model.gguf";
const TOKENIZER_FILE: &str = "tokenizer.json";

/// Resolved paths for one model.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub weights: PathBuf,
    pub tokenizer: PathBuf,
}

/// Resolve `model` to local artifact paths, downloading through `hf-hub`
/// when it is not a directory.
///
/// # Errors
/// Returns [`Error::Engine`] when no weights can be found and
/// [`Error::Tokenizer`] when the tokenizer file is missing.
pub fn resolve(model: &str) -> Result<ModelArtifacts> {
    let dir = Path::new(model);
    if dir.is_dir() {
        return resolve_local(dir);
    }

    let api = hf_hub::api::sync::Api::new()
        .map_err(|e| Error::Engine(format!("hub client: {e}")))?;
    let repo = api.model(model.to_string());
    let tokenizer = repo
        .get(TOKENIZER_FILE)
        .map_err(|e| Error::Tokenizer(format!("{model}/{TOKENIZER_FILE}: {e}")))?;
    let weights = repo
        .get(DEFAULT_WEIGHTS_FILE)
        .map_err(|e| Error::Engine(format!("{model}/{DEFAULT_WEIGHTS_FILE}: {e}")))?;

    Ok(ModelArtifacts { weights, tokenizer })
}

fn resolve_local(dir: &Path) -> Result<ModelArtifacts> {
    let tokenizer = dir.join(TOKENIZER_FILE);
    if !tokenizer.is_file() {
        return Err(Error::Tokenizer(format!(
            "no {TOKENIZER_FILE} in {}",
            dir.display()
        )));
    }

    // Any .gguf in the directory counts; pick the lexicographically first
    // so the choice is deterministic.
    let mut weights: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "gguf"))
        .collect();
    weights.sort();

    let weights = weights.into_iter().next().ok_or_else(|| {
        Error::Engine(format!("no .gguf weights file in {}", dir.display()))
    })?;

    Ok(ModelArtifacts { weights, tokenizer })
}

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{G2pError, G2pResult};

/// Graphemes the default (Icelandic) models are trained on.
pub const ICE_ALPHABET: &str = "aábdðeéfghiíjklmnoóprstuúvxyýþæö";

/// Environment variable overriding the default model path.
pub const MODEL_PATH_VAR: &str = "G2P_MODEL";

pub const DEFAULT_MODEL_PATH: &str = "data/pronlex.tsv";
pub const DEFAULT_VARIANT_LIMIT: usize = 4;
pub const DEFAULT_MASS_LIMIT: f64 = 0.9;

/// Search-bound and model settings shared by every prediction in a run.
/// Built once, passed by reference; never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorOptions {
    pub model_path: PathBuf,
    pub encoding: String,
    /// Maximum number of pronunciation variants retained per word.
    pub variant_limit: usize,
    /// Cumulative posterior mass at which variant extraction stops.
    pub mass_limit: f64,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            encoding: "UTF-8".to_string(),
            variant_limit: DEFAULT_VARIANT_LIMIT,
            mass_limit: DEFAULT_MASS_LIMIT,
        }
    }
}

impl TranslatorOptions {
    /// Default options, with the model path taken from `G2P_MODEL` when set.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(path) = env::var(MODEL_PATH_VAR) {
            options.model_path = PathBuf::from(path);
        }
        options
    }

    pub fn validate(&self) -> G2pResult<()> {
        if self.variant_limit == 0 {
            return Err(G2pError::Config("variant_limit must be at least 1".into()));
        }
        if !(self.mass_limit > 0.0 && self.mass_limit <= 1.0) {
            return Err(G2pError::Config(format!(
                "mass_limit must lie in (0, 1], got {}",
                self.mass_limit
            )));
        }
        let encoding = self.encoding.to_ascii_lowercase();
        if encoding != "utf-8" && encoding != "utf8" {
            return Err(G2pError::Config(format!(
                "unsupported encoding {:?}",
                self.encoding
            )));
        }
        Ok(())
    }
}

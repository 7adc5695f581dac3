use regex::Regex;

use crate::config::ICE_ALPHABET;
use crate::error::{G2pError, G2pResult};

/// Maps raw tokens to the grapheme sequences a model expects: lowercase
/// first, then delete every character outside a fixed alphabet. The
/// negated character class is compiled once per alphabet.
pub struct WordNormalizer {
    outside_alphabet: Regex,
}

impl WordNormalizer {
    pub fn new(alphabet: &str) -> G2pResult<Self> {
        if alphabet.is_empty() {
            return Err(G2pError::Config("alphabet must not be empty".into()));
        }
        let pattern = format!("[^{}]", regex::escape(alphabet));
        let outside_alphabet = Regex::new(&pattern)
            .map_err(|e| G2pError::Config(format!("bad alphabet pattern: {}", e)))?;
        Ok(Self { outside_alphabet })
    }

    /// Normalizer for the default Icelandic grapheme set.
    pub fn icelandic() -> Self {
        Self::new(ICE_ALPHABET).unwrap()
    }

    /// May return an empty string when no character survives filtering;
    /// such words come back from prediction with no hypotheses.
    pub fn normalize(&self, word: &str) -> String {
        let lowered = word.to_lowercase();
        self.outside_alphabet.replace_all(&lowered, "").into_owned()
    }
}

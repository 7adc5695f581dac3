use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TranslatorOptions;
use crate::translator::{NBestSearch, Translator};

/// One ranked pronunciation variant.
///
/// `posterior` is the candidate's exponentiated log-likelihood difference
/// against the search's reference likelihood, in `(0, 1]`. It is a
/// relative-confidence measure, not a probability normalized over the full
/// hypothesis space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub posterior: f64,
    /// Phoneme symbols joined by single spaces.
    pub pronunciation: String,
}

/// Every variant retained for one word, best-first. Empty when the model
/// could not transduce the word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub word: String,
    pub hypotheses: Vec<Hypothesis>,
}

impl Prediction {
    /// The top-ranked variant, if the word was transducible at all.
    pub fn top(&self) -> Option<&Hypothesis> {
        self.hypotheses.first()
    }
}

/// Extract ranked pronunciation variants for one word.
///
/// Candidates are pulled best-first from the model's search until
/// `options.variant_limit` variants are retained, their cumulative
/// posterior reaches `options.mass_limit`, or the search runs dry. Both
/// bounds are checked before the next candidate is requested, so the last
/// retained variant may carry the cumulative mass past `mass_limit`.
///
/// A word the model cannot transduce yields an empty prediction; that is
/// an expected outcome and never an error.
pub fn predict<T: Translator>(
    translator: &T,
    word: &str,
    options: &TranslatorOptions,
) -> Prediction {
    let mut hypotheses = Vec::new();
    match translator.init_search(word) {
        Ok(mut search) => {
            let mut total_posterior = 0.0;
            while total_posterior < options.mass_limit && hypotheses.len() < options.variant_limit {
                let Some(candidate) = search.next_candidate() else {
                    break;
                };
                let posterior = (candidate.log_likelihood - search.total_log_likelihood()).exp();
                hypotheses.push(Hypothesis {
                    posterior,
                    pronunciation: candidate.phonemes.join(" "),
                });
                total_posterior += posterior;
            }
        }
        Err(failure) => {
            debug!(word = failure.word.as_str(), "translation failure");
        }
    }
    Prediction {
        word: word.to_string(),
        hypotheses,
    }
}

/// [`predict`] over a word list, preserving input order.
pub fn predict_words<T: Translator>(
    translator: &T,
    words: &[String],
    options: &TranslatorOptions,
) -> Vec<Prediction> {
    words
        .iter()
        .map(|word| predict(translator, word, options))
        .collect()
}

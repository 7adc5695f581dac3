use std::collections::HashMap;
use std::collections::VecDeque;
use std::fs;

use tracing::debug;

use crate::config::TranslatorOptions;
use crate::error::{G2pError, G2pResult};
use crate::translator::{Candidate, NBestSearch, TranslationFailure, Translator};

/// A pronunciation model backed by a scored lexicon.
///
/// The model file is a TSV with one variant per line,
/// `word<TAB>phoneme sequence<TAB>log-likelihood`; `#` comment lines and
/// blank lines are skipped. Variants are grouped per word and sorted
/// best-first once at load time, so a search is an exact lookup plus a
/// cursor. Words without an entry cannot be transduced.
#[derive(Debug)]
pub struct LexiconModel {
    entries: HashMap<String, Vec<ScoredVariant>>,
}

#[derive(Debug, Clone)]
struct ScoredVariant {
    log_likelihood: f64,
    phonemes: Vec<String>,
}

impl LexiconModel {
    /// Load the model named by `options.model_path`.
    pub fn load(options: &TranslatorOptions) -> G2pResult<Self> {
        options.validate()?;
        let raw = fs::read_to_string(&options.model_path)?;
        let model = Self::parse(&raw)?;
        debug!(
            words = model.entries.len(),
            path = %options.model_path.display(),
            "loaded pronunciation model"
        );
        Ok(model)
    }

    pub fn parse(raw: &str) -> G2pResult<Self> {
        let mut entries: HashMap<String, Vec<ScoredVariant>> = HashMap::new();
        for (idx, line) in raw.lines().enumerate() {
            let line_no = idx + 1;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut cols = line.split('\t');
            let (word, phonemes, score) =
                match (cols.next(), cols.next(), cols.next(), cols.next()) {
                    (Some(word), Some(phonemes), Some(score), None) => (word, phonemes, score),
                    _ => {
                        return Err(G2pError::Model {
                            line: line_no,
                            reason: "expected three tab-separated columns".to_string(),
                        });
                    }
                };
            let log_likelihood: f64 = score.trim().parse().map_err(|_| G2pError::Model {
                line: line_no,
                reason: format!("bad log-likelihood {:?}", score),
            })?;
            if !log_likelihood.is_finite() {
                return Err(G2pError::Model {
                    line: line_no,
                    reason: format!("non-finite log-likelihood {}", log_likelihood),
                });
            }
            let phonemes: Vec<String> = phonemes.split_whitespace().map(str::to_string).collect();
            if phonemes.is_empty() {
                return Err(G2pError::Model {
                    line: line_no,
                    reason: "empty phoneme sequence".to_string(),
                });
            }
            entries.entry(word.to_string()).or_default().push(ScoredVariant {
                log_likelihood,
                phonemes,
            });
        }
        for variants in entries.values_mut() {
            variants.sort_by(|a, b| {
                b.log_likelihood
                    .partial_cmp(&a.log_likelihood)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        Ok(Self { entries })
    }

    pub fn word_count(&self) -> usize {
        self.entries.len()
    }
}

impl Translator for LexiconModel {
    type Search = LexiconSearch;

    fn init_search(&self, word: &str) -> Result<LexiconSearch, TranslationFailure> {
        let variants = self.entries.get(word).ok_or_else(|| TranslationFailure {
            word: word.to_string(),
        })?;
        let scores: Vec<f64> = variants.iter().map(|v| v.log_likelihood).collect();
        Ok(LexiconSearch {
            total_log_likelihood: log_sum_exp(&scores),
            queue: variants.iter().cloned().collect(),
        })
    }
}

/// Cursor over one word's ranked variants.
pub struct LexiconSearch {
    total_log_likelihood: f64,
    queue: VecDeque<ScoredVariant>,
}

impl NBestSearch for LexiconSearch {
    fn total_log_likelihood(&self) -> f64 {
        self.total_log_likelihood
    }

    fn next_candidate(&mut self) -> Option<Candidate> {
        self.queue.pop_front().map(|variant| Candidate {
            log_likelihood: variant.log_likelihood,
            phonemes: variant.phonemes,
        })
    }
}

fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    let sum: f64 = values.iter().map(|v| (v - max).exp()).sum();
    max + sum.ln()
}

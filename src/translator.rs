use thiserror::Error;

/// One ranked candidate produced by an n-best search.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Natural-log likelihood as scored by the model.
    pub log_likelihood: f64,
    /// Predicted pronunciation, one phoneme symbol per element.
    pub phonemes: Vec<String>,
}

/// The model cannot transduce an input at all, e.g. an unknown word or one
/// containing symbols the model never saw. A recognized outcome, not a
/// crate error: callers turn it into an empty prediction.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("no transduction for {word:?}")]
pub struct TranslationFailure {
    pub word: String,
}

/// A per-word cursor over a ranked (best-first) candidate enumeration.
/// `None` from [`next_candidate`](NBestSearch::next_candidate) means the
/// search is exhausted; that ends extraction silently.
pub trait NBestSearch {
    /// Reference log-likelihood used to normalize candidate posteriors,
    /// `posterior = exp(log_likelihood - total_log_likelihood)`.
    ///
    /// A search that can estimate it reports the total likelihood of the
    /// whole enumeration, making posteriors sum toward 1.0 across all
    /// candidates. A search that cannot reports its best candidate's
    /// score, which pins the top candidate's posterior at exactly 1.0.
    fn total_log_likelihood(&self) -> f64;

    fn next_candidate(&mut self) -> Option<Candidate>;
}

/// A loaded transduction model. Immutable after construction and shared
/// read-only across workers; each prediction opens its own search.
pub trait Translator: Send + Sync {
    type Search: NBestSearch;

    fn init_search(&self, word: &str) -> Result<Self::Search, TranslationFailure>;
}

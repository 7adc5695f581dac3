pub mod batch;
pub mod config;
pub mod error;
pub mod model;
pub mod nbest;
pub mod normalize;
pub mod phoneme_map;
pub mod translator;

pub use batch::{BatchReport, Transcriber};
pub use config::TranslatorOptions;
pub use error::{G2pError, G2pResult};
pub use model::LexiconModel;
pub use nbest::{Hypothesis, Prediction, predict, predict_words};
pub use normalize::WordNormalizer;
pub use phoneme_map::PhonemeMap;
pub use translator::{Candidate, NBestSearch, TranslationFailure, Translator};

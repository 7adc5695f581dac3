use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use rayon::prelude::*;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::config::TranslatorOptions;
use crate::error::{G2pError, G2pResult};
use crate::nbest::{self, Prediction};
use crate::normalize::WordNormalizer;
use crate::phoneme_map::PhonemeMap;
use crate::translator::Translator;

/// Word-, utterance- and file-level driver around the n-best extraction.
/// Owns the loaded model, the search bounds and the normalizer; all of it
/// is read-only after construction and shared across workers.
pub struct Transcriber<T: Translator> {
    translator: T,
    options: TranslatorOptions,
    normalizer: WordNormalizer,
    phoneme_map: Option<PhonemeMap>,
}

/// Counts from one file transcription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub lines: usize,
    /// Words that produced no pronunciation and were dropped from their
    /// line's phoneme block.
    pub failed_words: usize,
}

impl<T: Translator> Transcriber<T> {
    pub fn new(
        translator: T,
        options: TranslatorOptions,
        normalizer: WordNormalizer,
    ) -> G2pResult<Self> {
        options.validate()?;
        Ok(Self {
            translator,
            options,
            normalizer,
            phoneme_map: None,
        })
    }

    /// Post-process predicted phoneme symbols through a remapping table.
    pub fn with_phoneme_map(mut self, map: PhonemeMap) -> Self {
        self.phoneme_map = Some(map);
        self
    }

    pub fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    /// Ranked pronunciation variants for one raw token.
    pub fn predict_word(&self, raw: &str) -> Prediction {
        let word = self.normalizer.normalize(raw);
        let mut prediction = nbest::predict(&self.translator, &word, &self.options);
        if let Some(map) = &self.phoneme_map {
            for hypothesis in &mut prediction.hypotheses {
                hypothesis.pronunciation = map.remap_pronunciation(&hypothesis.pronunciation);
            }
        }
        prediction
    }

    /// Top-ranked pronunciation per word of a whitespace-separated
    /// utterance. Words the model cannot transduce are dropped from the
    /// result and logged; they never abort the utterance.
    pub fn utterance_phones(&self, utterance: &str) -> Vec<String> {
        self.line_phones(utterance).0
    }

    fn line_phones(&self, line: &str) -> (Vec<String>, usize) {
        let mut phones = Vec::new();
        let mut failed = 0;
        for raw in line.split_whitespace() {
            let prediction = self.predict_word(raw);
            match prediction.hypotheses.into_iter().next() {
                Some(best) => phones.push(best.pronunciation),
                None => {
                    warn!(word = raw, "no pronunciation, word dropped");
                    failed += 1;
                }
            }
        }
        (phones, failed)
    }

    /// Transcribe a file of utterances, one per line, onto `out`:
    /// `<line trimmed>\t~ <pron_1>\t...\t<pron_n> ~` per input line, in
    /// input order. Line transcription fans out over `jobs` worker
    /// threads; the output file is written atomically once all lines are
    /// done.
    pub fn transcribe_file(&self, src: &Path, out: &Path, jobs: usize) -> G2pResult<BatchReport> {
        if jobs == 0 {
            return Err(G2pError::Config("jobs must be at least 1".into()));
        }
        let reader = BufReader::new(File::open(src)?);
        let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|e| G2pError::Pool(e.to_string()))?;

        // Indexed parallel map: results come back in input order no matter
        // which worker finishes first. A panicking worker forfeits only
        // its own line.
        let results: Vec<(Vec<String>, usize)> = pool.install(|| {
            lines
                .par_iter()
                .map(|line| {
                    panic::catch_unwind(AssertUnwindSafe(|| self.line_phones(line)))
                        .unwrap_or_else(|_| {
                            warn!(line = line.as_str(), "worker panicked, line skipped");
                            (Vec::new(), line.split_whitespace().count())
                        })
                })
                .collect()
        });

        let parent = match out.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(&tmp);
            for (line, (phones, _)) in lines.iter().zip(&results) {
                writeln!(writer, "{}\t~ {} ~", line.trim(), phones.join("\t"))?;
            }
            writer.flush()?;
        }
        tmp.persist(out).map_err(|e| G2pError::Io(e.error))?;

        let report = BatchReport {
            lines: lines.len(),
            failed_words: results.iter().map(|(_, failed)| failed).sum(),
        };
        info!(
            lines = report.lines,
            failed_words = report.failed_words,
            "transcription written"
        );
        Ok(report)
    }
}

//! End-to-end file transcription over a real lexicon model file.

use std::fs;

use framburdur::{
    LexiconModel, PhonemeMap, Transcriber, TranslatorOptions, WordNormalizer, predict,
};

const MODEL: &str = "\
# scored pronunciation lexicon
hestur\th E s t Y r\t-0.3
hestur\th E s d Y r\t-2.1
dagur\tt a: G Y r\t-0.2
góður\tk ou D Y r\t-0.5
";

fn transcriber_from(dir: &std::path::Path) -> Transcriber<LexiconModel> {
    let model_path = dir.join("pronlex.tsv");
    fs::write(&model_path, MODEL).unwrap();
    let options = TranslatorOptions {
        model_path,
        ..Default::default()
    };
    let model = LexiconModel::load(&options).unwrap();
    Transcriber::new(model, options, WordNormalizer::icelandic()).unwrap()
}

#[test]
fn transcribes_file_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("utts.txt");
    let out = dir.path().join("utts.g2p");
    fs::write(&src, "Hestur dagur\ngóður X7q\ndagur\n").unwrap();

    let transcriber = transcriber_from(dir.path());
    let report = transcriber.transcribe_file(&src, &out, 3).unwrap();
    assert_eq!(report.lines, 3);
    // "X7q" normalizes to "x" and has no lexicon entry.
    assert_eq!(report.failed_words, 1);

    let written = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Hestur dagur\t~ h E s t Y r\tt a: G Y r ~");
    assert_eq!(lines[1], "góður X7q\t~ k ou D Y r ~");
    assert_eq!(lines[2], "dagur\t~ t a: G Y r ~");
}

#[test]
fn word_prediction_ranks_variants_and_remaps_symbols() {
    let dir = tempfile::tempdir().unwrap();
    let map_path = dir.path().join("map.tsv");
    fs::write(&map_path, "E\tɛ\nY\tʏ\n").unwrap();

    let transcriber =
        transcriber_from(dir.path()).with_phoneme_map(PhonemeMap::load(&map_path).unwrap());

    let prediction = transcriber.predict_word("Hestur,");
    assert_eq!(prediction.word, "hestur");
    assert_eq!(prediction.hypotheses.len(), 2);
    assert_eq!(prediction.hypotheses[0].pronunciation, "h ɛ s t ʏ r");
    assert_eq!(prediction.hypotheses[1].pronunciation, "h ɛ s d ʏ r");
    assert!(prediction.hypotheses[0].posterior > prediction.hypotheses[1].posterior);
    // Posteriors are normalized over the word's whole variant set.
    let total: f64 = prediction.hypotheses.iter().map(|h| h.posterior).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn untransducible_word_yields_empty_prediction_via_library_api() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("pronlex.tsv");
    fs::write(&model_path, MODEL).unwrap();
    let options = TranslatorOptions {
        model_path,
        ..Default::default()
    };
    let model = LexiconModel::load(&options).unwrap();

    let prediction = predict(&model, "útlendingur", &options);
    assert!(prediction.hypotheses.is_empty());
}

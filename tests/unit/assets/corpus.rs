use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;

#[test]
fn keeps_first_two_sentences() {
    assert_eq!(
        truncate_sentences("Hallo Welt. Wie geht es dir. Gut.", 2),
        "Hallo Welt. Wie geht es dir."
    );
}

#[test]
fn line_without_delimiter_gets_trailing_dot() {
    assert_eq!(truncate_sentences("ganz ohne Punkt", 2), "ganz ohne Punkt.");
}

#[test]
fn single_sentence_line_is_not_doubled() {
    assert_eq!(truncate_sentences("Nur ein Satz.", 2), "Nur ein Satz.");
}

#[test]
fn one_sentence_limit() {
    assert_eq!(truncate_sentences("Eins. Zwei. Drei.", 1), "Eins.");
}

#[test]
fn empty_corpus_is_rejected() {
    assert!(Corpus::from_text("").is_err());
    assert!(Corpus::from_text("\n   \n\t\n").is_err());
}

#[test]
fn blank_lines_are_not_candidates() {
    let corpus = Corpus::from_text("\nEins. Zwei.\n\n").unwrap();
    assert_eq!(corpus.len(), 1);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert_eq!(corpus.pick(&mut rng), "Eins. Zwei.");
}

#[test]
fn pick_is_uniformish_and_seeded() {
    let corpus = Corpus::from_text("a\nb\nc\nd").unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let picks: Vec<String> = (0..200).map(|_| corpus.pick(&mut rng)).collect();
    for want in ["a.", "b.", "c.", "d."] {
        assert!(picks.iter().any(|p| p == want), "never picked {want}");
    }

    let mut again = ChaCha8Rng::seed_from_u64(11);
    let replay: Vec<String> = (0..200).map(|_| corpus.pick(&mut again)).collect();
    assert_eq!(picks, replay);
}

#[test]
fn load_missing_corpus_is_io_error() {
    let err = Corpus::load(Path::new("target/no/such/corpus.txt")).unwrap_err();
    assert!(matches!(err, SynthError::Io(_)));
}

#[test]
fn runs_of_dots_do_not_count_as_sentences() {
    assert_eq!(truncate_sentences("Eins.. Zwei... Drei", 2), "Eins. Zwei.");
    assert_eq!(truncate_sentences("...", 2), ".");
}

#[test]
fn leading_and_doubled_dots_do_not_count_as_sentences() {
    assert_eq!(truncate_sentences(".Hallo. Welt", 2), "Hallo. Welt.");
    assert_eq!(truncate_sentences("A..B", 2), "A. B.");
}

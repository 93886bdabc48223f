use substitution::{
    analyze, decrypt, digraphs, encrypt, is_valid_key, ranked, suggest_key, AdjusterState, Key,
    KeyAdjuster,
};

const PLAINTEXT: &str = "It is a truth universally acknowledged, that a single man in \
possession of a good fortune, must be in want of a wife. However little known the \
feelings or views of such a man may be on his first entering a neighbourhood, this \
truth is so well fixed in the minds of the surrounding families, that he is considered \
the rightful property of some one or other of their daughters.";

fn secret_key() -> Key {
    Key::parse("phqgiumeaylnofdxjkrcvstzwb").unwrap()
}

#[test]
fn test_statistics_describe_the_ciphertext() {
    let ciphertext = encrypt(PLAINTEXT, &secret_key());
    let report = analyze(&ciphertext);

    // Substitution only relabels letters, so counts carry over
    let plain_report = analyze(PLAINTEXT);
    assert_eq!(report.total_letters(), plain_report.total_letters());
    assert_eq!(report.total_words(), plain_report.total_words());

    let e = secret_key().cipher_for('e').unwrap();
    assert_eq!(report.letters()[&e], plain_report.letters()[&'e']);

    // The single-letter word "a" shows up as its cipher letter
    let a = secret_key().cipher_for('a').unwrap().to_string();
    assert!(report.ranked_words(1).iter().any(|(word, _)| *word == a));

    let top_digraph = &ranked(&digraphs(&ciphertext))[0];
    assert!(top_digraph.1 >= 2);
}

#[test]
fn test_refinement_recovers_the_plaintext() {
    let secret = secret_key();
    let ciphertext = encrypt(PLAINTEXT, &secret);

    let suggested = suggest_key(&ciphertext);
    assert!(is_valid_key(&suggested.to_string()));
    assert_eq!(suggested, suggest_key(&ciphertext));

    // The analyst fixes one letter at a time until every mapping is right
    let mut adjuster = KeyAdjuster::new(suggested);
    for (plain, cipher) in secret.mapping_table() {
        adjuster.set_mapping(plain, cipher).unwrap();
        assert!(is_valid_key(&adjuster.current_key().to_string()));
    }

    let view = adjuster.view(&ciphertext);
    assert_eq!(view.preview, PLAINTEXT.chars().take(500).collect::<String>());

    let saved = adjuster.save().unwrap();
    assert_eq!(adjuster.state(), AdjusterState::Saved);
    assert_eq!(saved, secret);
    assert_eq!(decrypt(&ciphertext, &saved), PLAINTEXT);
}

#[test]
fn test_discarded_session_keeps_original_key() {
    let original = suggest_key("wkh txlfn eurzq ira");
    let mut adjuster = KeyAdjuster::new(original.clone());
    adjuster.swap_mapping('e', 't').unwrap();
    adjuster.discard().unwrap();

    assert_eq!(adjuster.state(), AdjusterState::Discarded);
    assert_ne!(adjuster.current_key(), &original);
    // The caller still owns its own copy
    assert_eq!(original, suggest_key("wkh txlfn eurzq ira"));
}

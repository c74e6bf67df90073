use proptest::prelude::*;
use spelltag::{
    compute_misspelled, find_all, replace_all, Dictionary, IgnoreSet, TextSpan, Tokenizer,
    WordPolicy,
};

fn dictionary() -> Dictionary {
    Dictionary::from_words(["the", "cat", "sat", "on", "mat", "hello", "world"]).unwrap()
}

fn text_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z éü',.!0-9-]{0,80}").unwrap()
}

fn assert_disjoint_and_bounded(spans: &[TextSpan], text: &str) {
    for span in spans {
        assert!(span.start < span.end);
        assert!(span.end <= text.len());
        assert!(span.slice(text).is_some());
    }
    for pair in spans.windows(2) {
        assert!(pair[0].end <= pair[1].start, "{} overlaps {}", pair[0], pair[1]);
    }
}

proptest! {
    #[test]
    fn misspelled_ranges_disjoint_and_in_bounds(text in text_strategy()) {
        let spans = compute_misspelled(&text, &Tokenizer::default(), &dictionary(), &IgnoreSet::new());
        assert_disjoint_and_bounded(&spans, &text);
    }

    #[test]
    fn misspelled_is_idempotent(text in text_strategy(), ascii in any::<bool>()) {
        let policy = if ascii { WordPolicy::Ascii } else { WordPolicy::Unicode };
        let tokenizer = Tokenizer::new(policy);
        let dict = dictionary();
        let ignored = IgnoreSet::new();
        prop_assert_eq!(
            compute_misspelled(&text, &tokenizer, &dict, &ignored),
            compute_misspelled(&text, &tokenizer, &dict, &ignored)
        );
    }

    #[test]
    fn ignoring_a_word_removes_only_that_word(
        words in proptest::collection::vec("[a-z]{1,6}", 1..12),
        pick in any::<prop::sample::Index>(),
    ) {
        // Distinct words of equal length cannot contain one another.
        let words: Vec<String> = words.into_iter().map(|w| format!("{w:x<6}")).collect();
        let text = words.join(" ");
        let target = pick.get(&words).clone();
        let tokenizer = Tokenizer::default();
        let dict = dictionary();

        let before = compute_misspelled(&text, &tokenizer, &dict, &IgnoreSet::new());
        let mut ignored = IgnoreSet::new();
        ignored.add(target.clone());
        let after = compute_misspelled(&text, &tokenizer, &dict, &ignored);

        let expected: Vec<TextSpan> = before
            .into_iter()
            .filter(|s| s.slice(&text) != Some(target.as_str()))
            .collect();
        prop_assert_eq!(after, expected);
    }

    #[test]
    fn empty_query_never_matches(text in text_strategy()) {
        prop_assert!(find_all(&text, "").is_empty());
    }

    #[test]
    fn search_matches_disjoint_and_in_bounds(text in text_strategy(), query in "[a-zA-Z]{1,3}") {
        let spans = find_all(&text, &query);
        assert_disjoint_and_bounded(&spans, &text);
        for span in &spans {
            prop_assert!(span.slice(&text).unwrap().eq_ignore_ascii_case(&query));
        }
    }

    #[test]
    fn replace_count_matches_find_count(text in text_strategy(), query in "[a-z]{1,3}") {
        let (_, count) = replace_all(&text, &query, "#");
        prop_assert_eq!(count, find_all(&text, &query).len());
    }
}

#[test]
fn tokenizer_gap_policy_is_pinned() {
    let words: Vec<&str> = Tokenizer::new(WordPolicy::Ascii)
        .tokenize("it's a test-case")
        .map(|t| t.text)
        .collect();
    assert_eq!(words, vec!["it", "s", "a", "test", "case"]);
}

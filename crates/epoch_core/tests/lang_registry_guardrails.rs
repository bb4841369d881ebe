use std::collections::HashMap;

use epoch_core::lang::keywords;
use epoch_core::lang::operators::{self, OperatorKind};
use epoch_core::lang::punctuation::{self, PunctuationCategory};
use epoch_core::lang::types;

#[test]
fn keywords_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, keywords::KeywordId> = HashMap::new();

    for info in keywords::KEYWORDS {
        assert_eq!(
            keywords::from_str(info.canonical),
            Some(info.id),
            "keyword canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(keywords::as_str(info.id), info.canonical);

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate keyword spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn punctuation_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, punctuation::PunctuationId> = HashMap::new();

    for info in punctuation::PUNCTUATION {
        assert_eq!(punctuation::from_str(info.canonical), Some(info.id));
        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate punctuation spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }

        // Every character of every spelling must be something the lexer treats as punctuation.
        for c in info.canonical.chars() {
            assert!(
                punctuation::is_punctuation_char(c),
                "{:?} contains non-punctuation char {:?}",
                info.canonical,
                c
            );
        }
    }
}

#[test]
fn compounds_are_exactly_two_chars_with_single_char_prefix() {
    for info in punctuation::PUNCTUATION {
        if info.category != PunctuationCategory::Compound {
            assert_eq!(info.canonical.chars().count(), 1, "{:?}", info.canonical);
            assert!(!punctuation::is_compound(info.canonical));
            continue;
        }
        assert_eq!(info.canonical.chars().count(), 2, "{:?}", info.canonical);
        assert!(punctuation::is_compound(info.canonical));

        let first: String = info.canonical.chars().take(1).collect();
        assert!(
            punctuation::from_str(&first).is_some(),
            "compound {:?} must start with a registered single mark",
            info.canonical
        );
    }
}

#[test]
fn operator_spellings_resolve_per_kind() {
    for info in operators::OPERATORS {
        assert_eq!(operators::from_str(info.spelling, info.kind), Some(info.id));
        assert!(
            punctuation::from_str(info.spelling).is_some(),
            "operator {:?} is not lexable as punctuation",
            info.spelling
        );
    }
    assert!(operators::info_for(operators::OperatorId::Assign).chainable);
    assert!(!operators::info_for(operators::OperatorId::AddAssign).chainable);
    assert_eq!(operators::from_str("=", OperatorKind::Binary), None);
}

#[test]
fn builtin_types_unique_and_not_keywords_except_nothing() {
    let mut seen = std::collections::HashSet::new();
    for info in types::BUILTIN_TYPES {
        assert!(seen.insert(info.canonical), "duplicate builtin {:?}", info.canonical);
        assert_eq!(types::from_str(info.canonical), Some(info.id));
        if info.canonical != "nothing" {
            assert!(!keywords::is_reserved(info.canonical), "{:?}", info.canonical);
        }
    }
}

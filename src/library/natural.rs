//! Natural ordering for manga, chapter and page names.
//!
//! The primary key is the first run of ASCII digits in the name, compared
//! by magnitude. Names with a number sort before names without one. Ties
//! fall through to a natural comparison of the folded names (accents
//! stripped, lowercased, every digit run numeric), and finally to raw byte
//! order so that no two distinct names ever compare equal.

use std::cmp::Ordering;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Compare two names.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (first_number(a), first_number(b)) {
        (Some(x), Some(y)) => cmp_digit_runs(x, y).then_with(|| fallback(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => fallback(a, b),
    }
}

/// Sort names in place.
pub fn sort(names: &mut [String]) {
    names.sort_by(|a, b| compare(a, b));
}

/// The first contiguous run of ASCII digits, if any.
pub fn first_number(name: &str) -> Option<&str> {
    let start = name.find(|c: char| c.is_ascii_digit())?;
    Some(split_digits(&name[start..]).0)
}

/// Accent- and case-insensitive natural comparison with a byte-order
/// tie-break.
pub fn fallback(a: &str, b: &str) -> Ordering {
    collate(a, b).then_with(|| a.as_bytes().cmp(b.as_bytes()))
}

fn collate(a: &str, b: &str) -> Ordering {
    natord::compare(&fold(a), &fold(b))
}

/// `Édition` -> `edition`.
fn fold(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Compare two digit runs by value without parsing, so arbitrarily long
/// runs never overflow.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        sort(&mut names);
        names
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        assert_eq!(compare("page2.jpg", "page10.jpg"), Ordering::Less);
        assert_eq!(compare("page10.jpg", "page9.jpg"), Ordering::Greater);
    }

    #[test]
    fn test_numbered_before_unnumbered() {
        assert_eq!(compare("cover.jpg", "001.jpg"), Ordering::Greater);
        assert_eq!(
            sorted(&["credits.png", "2.png", "cover.png", "1.png"]),
            vec!["1.png", "2.png", "cover.png", "credits.png"]
        );
    }

    #[test]
    fn test_first_number_only_is_primary() {
        // 3 < 10 on the first run, even though the second run disagrees.
        assert_eq!(compare("v3 c99", "v10 c1"), Ordering::Less);
    }

    #[test]
    fn test_leading_zero_tie_is_deterministic() {
        assert_eq!(
            cmp_digit_runs(first_number("page01.jpg").unwrap(), first_number("page1.jpg").unwrap()),
            Ordering::Equal
        );
        let forward = compare("page01.jpg", "page1.jpg");
        let backward = compare("page1.jpg", "page01.jpg");
        assert_ne!(forward, Ordering::Equal);
        assert_eq!(forward, backward.reverse());
        assert_eq!(sorted(&["page1.jpg", "page01.jpg"]), sorted(&["page01.jpg", "page1.jpg"]));
    }

    #[test]
    fn test_fallback_is_case_insensitive_and_numeric() {
        assert_eq!(collate("Extra", "extra"), Ordering::Equal);
        assert_eq!(compare("Extra", "extra"), Ordering::Less);
        assert_eq!(collate("omake", "Prologue"), Ordering::Less);
        // Same first number, fallback walks later runs numerically.
        assert_eq!(compare("ch1 part9", "ch1 part10"), Ordering::Less);
    }

    #[test]
    fn test_accents_fold_onto_base_letter() {
        assert_eq!(compare("Édition", "Zeta"), Ordering::Less);
        assert_eq!(collate("Édition", "edition"), Ordering::Equal);
        assert_eq!(
            sorted(&["Epilogue", "Zeta", "Édition", "Eclair"]),
            vec!["Eclair", "Édition", "Epilogue", "Zeta"]
        );
        // Precomposed and decomposed spellings stay distinct but adjacent.
        let decomposed = "E\u{301}dition";
        assert_eq!(collate("Édition", decomposed), Ordering::Equal);
        assert_ne!(compare("Édition", decomposed), Ordering::Equal);
    }

    #[test]
    fn test_equal_only_for_identical() {
        assert_eq!(compare("a.png", "a.png"), Ordering::Equal);
        assert_ne!(compare("A.png", "a.png"), Ordering::Equal);
    }

    #[test]
    fn test_huge_numbers() {
        assert_eq!(
            compare("99999999999999999999999.jpg", "100000000000000000000000.jpg"),
            Ordering::Less
        );
    }

    #[test]
    fn test_first_number() {
        assert_eq!(first_number("Chapter 012 - Start"), Some("012"));
        assert_eq!(first_number("no digits"), None);
    }
}

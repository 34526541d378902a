use crate::domain::model::{DomainName, Features};

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c.to_ascii_lowercase())
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !is_vowel(c)
}

/// Derives normalized lexical features from a parsed domain. Total function:
/// any validated `DomainName` produces features without failing.
pub fn extract_features(domain: &DomainName) -> Features {
    let name = &domain.name_only;
    let length = name.chars().count();

    let vowel_count = name.chars().filter(|c| is_vowel(*c)).count();
    // name_only is non-empty for validated input; the max(1) guards the
    // degenerate case anyway.
    let vowel_ratio = vowel_count as f64 / length.max(1) as f64;

    Features {
        length,
        vowel_ratio,
        consonant_cluster_count: count_consonant_clusters(name),
        has_hyphen_or_digit: name.chars().any(|c| c == '-' || c.is_ascii_digit()),
        tld: domain.tld.clone(),
    }
}

/// Counts maximal runs of three or more consecutive consonants.
fn count_consonant_clusters(name: &str) -> usize {
    let mut clusters = 0;
    let mut run = 0;

    for c in name.chars() {
        if is_consonant(c) {
            run += 1;
        } else {
            if run >= 3 {
                clusters += 1;
            }
            run = 0;
        }
    }
    if run >= 3 {
        clusters += 1;
    }

    clusters
}

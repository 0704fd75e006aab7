//! Fuzzy name matching for search.
//!
//! A candidate file name matches a query when the query is contained in the
//! name, or when the two are within a small edit distance of each other.
//! Containment catches prefix/suffix/partial matches of any length; the
//! distance branch catches near-miss typos on short names that containment
//! alone would miss.

/// Maximum edit distance accepted by the near-miss branch.
const MAX_EDIT_DISTANCE: usize = 2;

/// Decide whether a candidate file name matches a search query.
///
/// Both inputs are lowercased before comparison. The distance branch also
/// runs against the name's extension-stripped stem, so a typo'd query still
/// finds a name it differs from only by the extension.
pub fn matches(candidate_name: &str, query: &str) -> bool {
    let candidate = candidate_name.to_lowercase();
    let query = query.to_lowercase();

    if candidate.contains(&query) {
        return true;
    }
    if levenshtein(&candidate, &query) <= MAX_EDIT_DISTANCE {
        return true;
    }
    match candidate.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => levenshtein(stem, &query) <= MAX_EDIT_DISTANCE,
        _ => false,
    }
}

/// Classic Levenshtein distance: the minimum number of single-character
/// insertions, deletions, and substitutions transforming `a` into `b`.
///
/// Two-row dynamic programming over `char`s, computed over the full strings.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, &char_a) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &char_b) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(char_a != char_b);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

//! Typo suggestions for style names and option keys using Levenshtein distance

/// Minimum number of single-character edits turning `a` into `b`.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rows instead of the full matrix
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// The closest candidate within `max_distance` edits, case-insensitively.
///
/// Ties go to the candidate listed first.
pub fn closest<'a>(query: &str, candidates: &[&'a str], max_distance: usize) -> Option<&'a str> {
    let query = query.to_lowercase();
    candidates
        .iter()
        .map(|&candidate| (candidate, levenshtein_distance(&query, &candidate.to_lowercase())))
        .filter(|(_, distance)| *distance <= max_distance)
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

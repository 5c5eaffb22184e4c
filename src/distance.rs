//! Levenshtein edit distance used by the "did you mean" suggestion step.

/// Minimum number of single-character insertions, deletions or substitutions
/// needed to transform `a` into `b`.
///
/// Runs in O(len(a) * len(b)) time and O(min(len(a), len(b))) space: only one
/// row of the distance matrix is kept, with the shorter string as the row.
pub(crate) fn distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let mut a: Vec<char> = a.chars().collect();
    let mut b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    if a.len() > b.len() {
        std::mem::swap(&mut a, &mut b);
    }

    let mut row: Vec<usize> = (0..=a.len()).collect();
    for (i, bc) in b.iter().enumerate() {
        let mut prev = i + 1;
        for (j, ac) in a.iter().enumerate() {
            let current = if ac == bc {
                row[j]
            } else {
                // substitution, insertion, deletion
                row[j].min(prev).min(row[j + 1]) + 1
            };
            row[j] = prev;
            prev = current;
        }
        row[a.len()] = prev;
    }
    row[a.len()]
}

//! Edit distance used to rank fuzzy suggestions.
//!
//! The distance is only ever used as a ranking key. There is no cut-off: the
//! closest candidate is always offered, however far away it is.

/// Levenshtein distance between `a` and `b`.
///
/// Counts the minimum number of single character insertions, deletions or
/// substitutions needed to turn `a` into `b`. Comparison is per `char`, so
/// multi-byte characters count as one edit.
///
/// # Examples
///
/// ```
/// use ignite_core::distance::distance;
///
/// assert_eq!(distance("kitten", "sitting"), 3);
/// assert_eq!(distance("", "abc"), 3);
/// ```
#[must_use]
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }

    if b.is_empty() {
        return a.len();
    }

    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];

    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }

    table[0] = (0..=b.len()).collect();

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);

            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + cost);
        }
    }

    table[a.len()][b.len()]
}

/// Picks the candidate whose key is closest to `target`.
///
/// Ties keep the earliest candidate, so the result follows the iteration
/// order of `candidates`. Returns the candidate together with its distance,
/// or `None` when there are no candidates.
pub fn closest<T, F>(target: &str, candidates: impl IntoIterator<Item = T>, key: F) -> Option<(T, usize)>
where
    F: Fn(&T) -> &str,
{
    candidates
        .into_iter()
        .map(|candidate| {
            let score = distance(target, key(&candidate));
            (candidate, score)
        })
        .min_by_key(|(_, score)| *score)
}

//! Core string-distance functions for product search

/// Minimum similarity a non-substring candidate needs to count as a match
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.2;

/// Levenshtein edit distance between `name` and `query`, counted in chars
///
/// Rows walk the query, columns walk the name. Only the previous row is kept,
/// the recurrence is the full `(len(query)+1) x (len(name)+1)` table.
pub fn edit_distance(name: &str, query: &str) -> usize {
    let name_chars: Vec<char> = name.chars().collect();
    let query_chars: Vec<char> = query.chars().collect();

    if query_chars.is_empty() {
        return name_chars.len();
    }
    if name_chars.is_empty() {
        return query_chars.len();
    }

    // Row 0: cost of building each name prefix from nothing
    let mut above: Vec<usize> = (0..=name_chars.len()).collect();
    let mut current = vec![0; name_chars.len() + 1];

    for (j, q) in query_chars.iter().enumerate() {
        current[0] = j + 1;
        for (i, n) in name_chars.iter().enumerate() {
            let substitution_cost = if n == q { 0 } else { 1 };
            current[i + 1] = (current[i] + 1)
                .min(above[i + 1] + 1)
                .min(above[i] + substitution_cost);
        }
        std::mem::swap(&mut above, &mut current);
    }

    above[name_chars.len()]
}

/// Normalized closeness in `[0, 1]`: `1 - distance / max(len(a), len(b))`
///
/// Two empty strings are identical and score 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / max_len as f64
}

/// Lowercase both sides the same way before comparing
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

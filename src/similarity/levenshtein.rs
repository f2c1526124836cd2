//! Edit distance for typo-tolerant name comparison.

/// Levenshtein (edit) distance between two strings, counted in chars.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two rows instead of the full matrix
    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;

        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);

            curr_row[j + 1] = (prev_row[j + 1] + 1) // deletion
                .min(curr_row[j] + 1) // insertion
                .min(prev_row[j] + cost); // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}

/// Edit budget for a candidate name: one extra edit per word for
/// multi-word names (middle names, initials), a single edit otherwise.
pub fn distance_budget(word_count: usize) -> usize {
    if word_count > 1 {
        word_count + 1
    } else {
        1
    }
}

/// Whether `a` and `b` are within `max_distance` edits. Skips the matrix
/// when the length difference alone already exceeds the budget.
pub fn within_distance(a: &str, b: &str, max_distance: usize) -> bool {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a.abs_diff(len_b) > max_distance {
        return false;
    }
    levenshtein_distance(a, b) <= max_distance
}

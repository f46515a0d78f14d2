//! Text-only similarity scoring over (spoken, expected) transcript pairs.
//! No acoustic data is involved; the capture layer owns recognition.

/// Lowercase, strip punctuation, collapse whitespace. Scoring and pattern
/// matching both run on this normal form.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;
    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '\'' {
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

pub fn words(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(|w| w.to_string())
        .collect()
}

pub fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, item_a) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, item_b) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(item_a != item_b);
            current[j + 1] = substitution.min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }

    prev[b.len()]
}

fn similarity<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

const WORD_WEIGHT: f64 = 0.6;
const CHAR_WEIGHT: f64 = 0.4;

/// Word/character-blend similarity on [0, 100]. Identical normalized
/// strings score exactly 100; any difference lands strictly below it.
/// Degenerate input clamps to 0 instead of erroring.
pub fn calculate_accuracy(spoken: &str, expected: &str) -> f64 {
    let spoken_norm = normalize(spoken);
    let expected_norm = normalize(expected);

    if spoken_norm == expected_norm {
        return 100.0;
    }
    if spoken_norm.is_empty() || expected_norm.is_empty() {
        return 0.0;
    }

    let spoken_words: Vec<&str> = spoken_norm.split(' ').collect();
    let expected_words: Vec<&str> = expected_norm.split(' ').collect();
    let spoken_chars: Vec<char> = spoken_norm.chars().collect();
    let expected_chars: Vec<char> = expected_norm.chars().collect();

    let word_sim = similarity(&spoken_words, &expected_words);
    let char_sim = similarity(&spoken_chars, &expected_chars);
    let blended = (WORD_WEIGHT * word_sim + CHAR_WEIGHT * char_sim) * 100.0;

    // Normal forms differ, so the score must not round back up to 100.
    blended.clamp(0.0, 99.9)
}

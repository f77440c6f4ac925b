//! Text similarity between adapter responses.
//!
//! Cosine similarity over term-frequency vectors. Logographic languages are
//! tokenized per character, everything else per lowercased word.

use crate::core::adapter::AdapterId;
use crate::core::language;
use crate::core::string::{char_terms, words};
use std::collections::HashMap;

/// Terms of `text` at the granularity appropriate for `language`
pub fn terms(text: &str, language: &str) -> Vec<String> {
    if language::is_logographic(language) {
        char_terms(text)
    } else {
        words(text)
    }
}

fn term_frequencies(text: &str, language: &str) -> HashMap<String, f64> {
    let mut tf = HashMap::new();
    for term in terms(text, language) {
        *tf.entry(term).or_insert(0.0) += 1.0;
    }
    tf
}

/// Cosine similarity of two texts in `[0, 1]`.
///
/// Either text having no terms yields 0.
pub fn similarity(a: &str, b: &str, language: &str) -> f64 {
    let va = term_frequencies(a, language);
    let vb = term_frequencies(b, language);

    let magnitude_a = va.values().map(|x| x * x).sum::<f64>().sqrt();
    let magnitude_b = vb.values().map(|x| x * x).sum::<f64>().sqrt();
    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    // Iterate the smaller map; terms missing from the other contribute 0.
    let (small, large) = if va.len() <= vb.len() {
        (&va, &vb)
    } else {
        (&vb, &va)
    };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, x)| large.get(term).map(|y| x * y))
        .sum();

    (dot / (magnitude_a * magnitude_b)).clamp(0.0, 1.0)
}

/// Symmetric pairwise similarity of a set of responses.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    pairs: HashMap<(AdapterId, AdapterId), f64>,
}

impl SimilarityMatrix {
    /// Compute the matrix for `(adapter, text)` pairs.
    ///
    /// The diagonal is 1.0 by construction; each unordered pair is computed once.
    pub fn compute(responses: &[(AdapterId, &str)], language: &str) -> Self {
        let mut pairs = HashMap::new();
        for (i, (id_a, text_a)) in responses.iter().enumerate() {
            pairs.insert((id_a.clone(), id_a.clone()), 1.0);
            for (id_b, text_b) in responses.iter().skip(i + 1) {
                let s = similarity(text_a, text_b, language);
                pairs.insert((id_a.clone(), id_b.clone()), s);
                pairs.insert((id_b.clone(), id_a.clone()), s);
            }
        }
        Self { pairs }
    }

    pub fn get(&self, a: &AdapterId, b: &AdapterId) -> Option<f64> {
        self.pairs.get(&(a.clone(), b.clone())).copied()
    }

    /// Similarities of `adapter` against every other adapter in the matrix
    pub fn peers_of<'a>(&'a self, adapter: &'a AdapterId) -> impl Iterator<Item = f64> + 'a {
        self.pairs
            .iter()
            .filter(move |((a, b), _)| a == adapter && b != adapter)
            .map(|(_, s)| *s)
    }

    /// Mean similarity of `adapter` against its peers (0 when it has none)
    pub fn mean_peer_similarity(&self, adapter: &AdapterId) -> f64 {
        let (sum, count) = self
            .peers_of(adapter)
            .fold((0.0, 0usize), |(sum, count), s| (sum + s, count + 1));
        if count == 0 { 0.0 } else { sum / count as f64 }
    }
}

//! Edit distance between index keys and queries

/// Computes a non-negative distance between two strings; smaller is closer.
pub trait EditDistance: Send + Sync {
    fn distance(&self, a: &str, b: &str) -> usize;
}

impl<F> EditDistance for F
where
    F: Fn(&str, &str) -> usize + Send + Sync,
{
    fn distance(&self, a: &str, b: &str) -> usize {
        self(a, b)
    }
}

/// Levenshtein distance over chars, via `strsim`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl EditDistance for Levenshtein {
    #[inline]
    fn distance(&self, a: &str, b: &str) -> usize {
        strsim::levenshtein(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(Levenshtein.distance("ell", "bell"), 1);
        assert_eq!(Levenshtein.distance("ell", "hello"), 2);
        assert_eq!(Levenshtein.distance("same", "same"), 0);
    }

    #[test]
    fn test_closure_distance() {
        let by_length = |a: &str, b: &str| a.len().abs_diff(b.len());
        assert_eq!(by_length.distance("ab", "abcd"), 2);
    }
}

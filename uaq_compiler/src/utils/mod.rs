//! Shared utilities for the UAQ compiler

pub mod span;

pub use span::Span;

/// Split a slice into consecutive chunks of at most `chunk_size` elements.
///
/// The final chunk carries the remainder and may be shorter. An empty input
/// produces no chunks.
pub fn chunk<T: Clone>(items: &[T], chunk_size: usize) -> Vec<Vec<T>> {
    debug_assert!(chunk_size > 0, "chunk size must be positive");
    items
        .chunks(chunk_size.max(1))
        .map(|group| group.to_vec())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_exact_division() {
        let chunks = chunk(&[1, 2, 3, 4], 2);
        assert_eq!(chunks, vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_chunk_with_remainder() {
        let chunks = chunk(&[1, 2, 3, 4, 5], 2);
        assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5]]);
    }

    #[test]
    fn test_chunk_size_one() {
        let chunks = chunk(&["a", "b"], 1);
        assert_eq!(chunks, vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn test_chunk_empty_input() {
        let chunks: Vec<Vec<i32>> = chunk(&[], 3);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_chunk_larger_than_input() {
        let chunks = chunk(&[1, 2], 10);
        assert_eq!(chunks, vec![vec![1, 2]]);
    }
}

//! Domain-neutral manipulation of ordered, duplicate-free sequences.
//!
//! Every reordering in the crate (alphabet rotation, keyed alphabets,
//! rotation tables) is a thin composition of the functions in this module.
//! They are stateless: callers own their sequences and always receive a new
//! `Vec` back. Invariant violations fail at the call site.
//!
//! # Rotation direction
//!
//! `rotate(seq, k)[i] == seq[(i + k) mod len]`, so a positive offset moves
//! later elements to the front:
//!
//! ```
//! use cipherchain::sequence;
//!
//! let rotated = sequence::rotate(&['A', 'B', 'C'], 1).unwrap();
//! assert_eq!(rotated, vec!['B', 'C', 'A']);
//! ```

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{CipherError, Result};

/// Check that a sequence is non-empty and free of duplicates.
pub fn ensure_unique<T: Eq + Hash + Debug>(sequence: &[T]) -> Result<()> {
    if sequence.is_empty() {
        return Err(CipherError::invalid_sequence("sequence is empty"));
    }

    let mut seen = HashSet::with_capacity(sequence.len());
    for element in sequence {
        if !seen.insert(element) {
            return Err(CipherError::invalid_sequence(format!(
                "duplicate element {:?}",
                element
            )));
        }
    }

    Ok(())
}

/// Validate a sequence, handing it back unchanged when it is usable.
///
/// Fails with [`CipherError::InvalidSequence`] if the sequence is empty or
/// contains duplicates.
pub fn validate<T: Eq + Hash + Debug>(sequence: Vec<T>) -> Result<Vec<T>> {
    ensure_unique(&sequence)?;
    Ok(sequence)
}

/// Reduce any integer offset into `[0, length)`.
pub fn normalize_offset(offset: i64, length: usize) -> Result<usize> {
    if length == 0 {
        return Err(CipherError::InvalidOffset { length });
    }
    // i128 keeps i64::MIN and usize lengths in range
    Ok((offset as i128).rem_euclid(length as i128) as usize)
}

/// Return a rotated copy: element `i` of the output is element
/// `(i + offset) mod len` of the input. Negative offsets rotate the other way.
pub fn rotate<T: Clone>(sequence: &[T], offset: i64) -> Result<Vec<T>> {
    let shift = normalize_offset(offset, sequence.len())?;
    Ok(rotate_normalized(sequence, shift))
}

/// Rotation by an offset already reduced modulo the (non-zero) length.
pub(crate) fn rotate_normalized<T: Clone>(sequence: &[T], shift: usize) -> Vec<T> {
    let mut rotated = Vec::with_capacity(sequence.len());
    rotated.extend_from_slice(&sequence[shift..]);
    rotated.extend_from_slice(&sequence[..shift]);
    rotated
}

/// Position of `element` in `sequence`.
pub fn index_of<T: PartialEq + Debug>(sequence: &[T], element: &T) -> Result<usize> {
    sequence
        .iter()
        .position(|candidate| candidate == element)
        .ok_or_else(|| CipherError::element_not_found(element))
}

/// Reorder `sequence` so that output position `i` holds
/// `sequence[permutation[i]]`.
///
/// The permutation must contain every index in `[0, len)` exactly once.
pub fn reorder<T: Clone>(sequence: &[T], permutation: &[usize]) -> Result<Vec<T>> {
    if permutation.len() != sequence.len() {
        return Err(CipherError::invalid_permutation(format!(
            "permutation has {} indices but sequence has {} elements",
            permutation.len(),
            sequence.len()
        )));
    }

    let mut used = vec![false; sequence.len()];
    for &index in permutation {
        match used.get_mut(index) {
            None => {
                return Err(CipherError::invalid_permutation(format!(
                    "index {} is out of range for length {}",
                    index,
                    sequence.len()
                )));
            }
            Some(true) => {
                return Err(CipherError::invalid_permutation(format!(
                    "index {} appears more than once",
                    index
                )));
            }
            Some(slot) => *slot = true,
        }
    }

    Ok(permutation.iter().map(|&i| sequence[i].clone()).collect())
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Number of distinct rotations reached by stepping `step` positions at a
/// time over a sequence of `length` elements.
///
/// A step that is coprime with the length visits every rotation; a step of
/// zero (mod length) only ever produces the unrotated sequence.
pub fn cycle_length(length: usize, step: i64) -> Result<usize> {
    let step = normalize_offset(step, length)?;
    Ok(length / gcd(step, length))
}

/// Every distinct rotation reached from offset 0 in increments of `step`,
/// in visiting order.
pub fn rotations<T: Clone>(sequence: &[T], step: i64) -> Result<Vec<Vec<T>>> {
    let length = sequence.len();
    let step = normalize_offset(step, length)?;
    let count = length / gcd(step, length);

    Ok((0..count)
        .map(|k| rotate_normalized(sequence, (k * step) % length))
        .collect())
}

/// Move `elements` to the front of `sequence`, in the order given.
///
/// Repeated elements only count once (first occurrence wins). All other
/// elements keep their relative order. Every element must be present.
pub fn move_to_front<T: Clone + Eq + Hash + Debug>(sequence: &[T], elements: &[T]) -> Result<Vec<T>> {
    let mut front = Vec::with_capacity(elements.len());
    let mut picked = HashSet::with_capacity(elements.len());
    for element in elements {
        if picked.insert(element) {
            front.push(index_of(sequence, element)?);
        }
    }

    let chosen: HashSet<usize> = front.iter().copied().collect();
    let permutation: Vec<usize> = front
        .into_iter()
        .chain((0..sequence.len()).filter(|i| !chosen.contains(i)))
        .collect();

    reorder(sequence, &permutation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<char> {
        vec!['A', 'B', 'C']
    }

    // =========================================================================
    // validate
    // =========================================================================

    #[test]
    fn test_validate_accepts_unique_sequence() {
        assert_eq!(validate(abc()).unwrap(), abc());
    }

    #[test]
    fn test_validate_rejects_empty_and_duplicates() {
        let empty: Vec<char> = Vec::new();
        assert!(matches!(
            validate(empty),
            Err(CipherError::InvalidSequence { .. })
        ));
        assert!(matches!(
            validate(vec!['A', 'B', 'A']),
            Err(CipherError::InvalidSequence { .. })
        ));
    }

    // =========================================================================
    // rotate
    // =========================================================================

    #[test]
    fn test_rotate_positive_and_negative() {
        assert_eq!(rotate(&abc(), 1).unwrap(), vec!['B', 'C', 'A']);
        assert_eq!(rotate(&abc(), -1).unwrap(), vec!['C', 'A', 'B']);
        assert_eq!(rotate(&abc(), 0).unwrap(), abc());
    }

    #[test]
    fn test_rotate_wraps_large_offsets() {
        assert_eq!(rotate(&abc(), 4).unwrap(), rotate(&abc(), 1).unwrap());
        assert_eq!(rotate(&abc(), i64::MIN).unwrap(), rotate(&abc(), 1).unwrap());
    }

    #[test]
    fn test_rotate_empty_fails() {
        let empty: Vec<char> = Vec::new();
        assert_eq!(
            rotate(&empty, 3),
            Err(CipherError::InvalidOffset { length: 0 })
        );
    }

    // =========================================================================
    // index_of / reorder
    // =========================================================================

    #[test]
    fn test_index_of() {
        assert_eq!(index_of(&abc(), &'C').unwrap(), 2);
        assert!(matches!(
            index_of(&abc(), &'Z'),
            Err(CipherError::ElementNotFound { .. })
        ));
    }

    #[test]
    fn test_reorder_follows_permutation() {
        assert_eq!(reorder(&abc(), &[2, 0, 1]).unwrap(), vec!['C', 'A', 'B']);
    }

    #[test]
    fn test_reorder_rejects_non_bijections() {
        for bad in [&[0, 1][..], &[0, 1, 1][..], &[0, 1, 3][..], &[0, 1, 2, 3][..]] {
            assert!(
                matches!(
                    reorder(&abc(), bad),
                    Err(CipherError::InvalidPermutation { .. })
                ),
                "permutation {:?} should be rejected",
                bad
            );
        }
    }

    // =========================================================================
    // cycles and keyword moves
    // =========================================================================

    #[test]
    fn test_cycle_length() {
        assert_eq!(cycle_length(10, 3).unwrap(), 10);
        assert_eq!(cycle_length(10, 2).unwrap(), 5);
        assert_eq!(cycle_length(10, 0).unwrap(), 1);
        assert_eq!(cycle_length(6, -2).unwrap(), 3);
    }

    #[test]
    fn test_rotations_visit_in_step_order() {
        let rows = rotations(&abc(), 1).unwrap();
        assert_eq!(
            rows,
            vec![abc(), vec!['B', 'C', 'A'], vec!['C', 'A', 'B']]
        );

        let digits: Vec<u8> = (0..6).collect();
        assert_eq!(rotations(&digits, 2).unwrap().len(), 3);
    }

    #[test]
    fn test_move_to_front() {
        let seq: Vec<char> = "ABCDE".chars().collect();
        let moved = move_to_front(&seq, &['D', 'B', 'D']).unwrap();
        assert_eq!(moved, vec!['D', 'B', 'A', 'C', 'E']);

        assert!(move_to_front(&seq, &['Z']).is_err());
    }
}

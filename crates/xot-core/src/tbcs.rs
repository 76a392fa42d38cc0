//! Tree-based controlled swap network (TBCS).
//!
//! The network views an array of `2^e` elements as the leaves of a complete binary tree. Level
//! `h` of the tree (processed from `h = e - 1` down to `0`) partitions the array into groups of
//! `2^(e - h)` elements, and bit `b[h]` of the control string decides whether the two halves of
//! every group are swapped.
//!
//! With the control string MSB first, the swap at level `h` flips bit `e - 1 - h` of every
//! element's position. A pass with control string `b` therefore moves the element at position
//! `j` to position `j ^ b`. In particular:
//!
//! - A pass with `bits(idx)` moves the element at `idx` to position `0`.
//! - Two passes with `b1` and `b2` equal one pass with `b1 ^ b2`.

use crate::TransferError;

/// Returns `log2(n)` if `n` is a power of two.
pub fn depth(n: usize) -> Result<usize, TransferError> {
    if !n.is_power_of_two() {
        return Err(TransferError::config(format!(
            "the number of elements must be a power of two, got {n}"
        )));
    }

    Ok(n.trailing_zeros() as usize)
}

/// Applies the swap network to `items` in-place.
///
/// # Arguments
///
/// * `items` - The array to permute, its length must be a power of two.
/// * `bits` - The control string, most significant bit first. Its length must be
///   `log2(items.len())`.
///
/// The array is left untouched if an error is returned.
pub fn apply<T>(items: &mut [T], bits: &[bool]) -> Result<(), TransferError> {
    let e = depth(items.len())?;

    if bits.len() != e {
        return Err(TransferError::config(format!(
            "the length of the control string must be log2(n) = {e}, got {}",
            bits.len()
        )));
    }

    for h in (0..e).rev() {
        if !bits[h] {
            continue;
        }

        let group_size = 1 << (e - h);
        for group in items.chunks_exact_mut(group_size) {
            let (left, right) = group.split_at_mut(group_size / 2);
            left.swap_with_slice(right);
        }
    }

    Ok(())
}

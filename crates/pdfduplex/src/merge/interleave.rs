//! The interleave-with-reversal law.
//!
//! A duplex batch scanned on a single-sided feeder produces the front sides
//! in reading order and, after flipping the stack, the back sides in reverse
//! order. For `n` sheets the true page sequence is
//!
//! ```text
//! O[2i]     = front[i]
//! O[2i + 1] = back[n - 1 - i]      for i in 0..n
//! ```
//!
//! This module holds that law on plain slices, independent of any document
//! type, so it can be checked exhaustively.

use crate::error::{DuplexError, Result};

/// Interleave `front` with the reversed `back`.
///
/// # Errors
///
/// Returns [`DuplexError::PageCountMismatch`] if the slices differ in
/// length. No partial sequence is ever produced.
///
/// # Examples
///
/// ```
/// use pdfduplex::merge::interleave_reversed;
///
/// let merged = interleave_reversed(&["F1", "F2", "F3"], &["B1", "B2", "B3"]).unwrap();
/// assert_eq!(merged, ["F1", "B3", "F2", "B2", "F3", "B1"]);
/// ```
pub fn interleave_reversed<T: Clone>(front: &[T], back: &[T]) -> Result<Vec<T>> {
    if front.len() != back.len() {
        return Err(DuplexError::PageCountMismatch {
            front: front.len(),
            back: back.len(),
        });
    }

    let mut merged = Vec::with_capacity(front.len() * 2);
    for (f, b) in front.iter().zip(back.iter().rev()) {
        merged.push(f.clone());
        merged.push(b.clone());
    }
    Ok(merged)
}

//! Bit arithmetic on 32-bit type masks
//!
//! A type tag is a `u32` with exactly one bit set. A membership mask is the
//! union of the tags stored in a container, so one container holds at most
//! [`MAX_TAGS`] distinct kinds.

/// Number of distinct tags a single mask can carry.
pub const MAX_TAGS: usize = u32::BITS as usize;

/// 1-based ordinal of `target` among the set bits of `all`, or `0` when
/// `target` is not a member of `all`.
///
/// Counts every bit of `all` at or below the position of `target`:
///
/// ```text
///    all = 0110_1101
/// target = 0000_1000
///          ---------
///                  3
/// ```
///
/// `target` must be a single-bit tag. A result of `0` cannot be told apart
/// from "absent" by value alone, so callers check `all & target != 0` before
/// turning the ordinal into an array index.
#[inline]
pub const fn bit_index(all: u32, target: u32) -> u32 {
    if all & target == 0 {
        return 0;
    }
    // For a power of two, 2 * target - 1 sets every bit at or below it.
    // The top bit wraps to all ones, which is still the right mask.
    let at_or_below = target.wrapping_shl(1).wrapping_sub(1) & all;
    at_or_below.count_ones()
}

/// Whether `tag` is a valid type tag (exactly one bit set).
#[inline]
pub const fn is_type_tag(tag: u32) -> bool {
    tag.is_power_of_two()
}

/// Iterate the single-bit tags of `mask`, lowest bit first.
#[inline]
pub fn tags(mask: u32) -> Tags {
    Tags { remaining: mask }
}

/// Iterator returned by [`tags`].
#[derive(Debug, Clone)]
pub struct Tags {
    remaining: u32,
}

impl Iterator for Tags {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        let lowest = self.remaining & self.remaining.wrapping_neg();
        self.remaining &= self.remaining - 1;
        Some(lowest)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Tags {}

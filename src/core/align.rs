// src/core/align.rs
// Longest contiguous common run between two token sequences.
//
// NOTE: This is a "longest common substring" scan, not "longest common
// subsequence" -- the matched tokens must be contiguous. The longest
// common subsequence of "foolish" and "fools" is "fools"; the longest
// common run is "fool".

/// Result of [`longest_common_run`]. When `len == 0` the offsets carry no
/// meaning; callers must treat that as "no common run", not as an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommonRun {
    pub len: usize,
    pub off_a: usize,
    pub off_b: usize,
}

/// Find a maximal contiguous run shared by `a` and `b`, i.e. the largest
/// `len` such that `a[i..i+len] == b[j..j+len]`.
///
/// Among runs of maximal length the smallest `i` wins, then the smallest
/// `j`. The scan runs twice, the second time with the operands swapped and
/// carrying the first pass's best, which is what refines the offset choice.
/// Naive O(|a|*|b|) with a short-circuit; fine for sibling lists and the
/// short-ish strings the learner feeds it.
pub fn longest_common_run<T: PartialEq>(a: &[T], b: &[T]) -> CommonRun {
    let (len, off_a, off_b) = half_match(a, b, 0, -1, -1);
    let (len, off_b, off_a) = half_match(b, a, len, off_b, off_a);
    if len == 0 {
        return CommonRun { len: 0, off_a: 0, off_b: 0 };
    }
    CommonRun {
        len,
        off_a: off_a as usize,
        off_b: off_b as usize,
    }
}

/// One half of the scan: slides `a` along `b`, so it only sees alignments
/// where the run starts no later in `a` than in `b`. Offsets are -1 until
/// a run has been seen.
fn half_match<T: PartialEq>(
    a: &[T],
    b: &[T],
    mut best: usize,
    mut off_a: isize,
    mut off_b: isize,
) -> (usize, isize, isize) {
    let (la, lb) = (a.len(), b.len());
    let mut i = 0; // b index
    while i < lb {
        if best >= lb - i {
            break; // no room left for a longer run
        }
        let mut current = 0usize;
        let mut j = i;
        let mut k = 0;
        while k < la && j < lb {
            if a[k] == b[j] {
                current += 1;
                if current >= best {
                    let new_a = (k + 1 - current) as isize;
                    let new_b = (j + 1 - current) as isize;
                    // Same-length runs only displace the incumbent when
                    // both offsets move left.
                    if current > best || (new_a <= off_a && new_b <= off_b) {
                        off_a = new_a;
                        off_b = new_b;
                    }
                    best = current;
                }
            } else {
                current = 0;
            }
            j += 1;
            k += 1;
        }
        i += 1;
    }
    (best, off_a, off_b)
}

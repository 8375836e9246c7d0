//! Sorting algorithms over an [`ItemArray`].
//!
//! Every routine sorts the whole array in non-decreasing order and touches
//! cells only through the observed operations, so each comparison, copy
//! and swap shows up in the animation. Arrays shorter than two cells are
//! returned untouched.

use alloc::vec;
use alloc::vec::Vec;

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    array::{AccessObserver, Interrupted, ItemArray},
    item::Item,
};

type SortResult = Result<(), Interrupted>;

/// Gap sequence of shell sort, largest first
pub const SHELL_GAPS: [usize; 16] = [
    1_391_376, 463_792, 198_768, 86_961, 33_936, 13_776, 4_592, 1_968, 861, 336, 112, 48, 21,
    7, 3, 1,
];

/// Digit base of both radix sorts
pub const RADIX: usize = 4;

/// Wall-clock budget of bozo sort
pub const BOZO_BUDGET: Duration = Duration::from_secs(20);

/// Rounds of bozo sort while the clock stands still
pub const BOZO_HEADLESS_ROUNDS: usize = 1000;

// *** simple quadratic sorts

pub fn selection_sort<O: AccessObserver>(a: &mut ItemArray<O>) -> SortResult {
    let n = a.len();
    if n < 2 {
        return Ok(());
    }
    for i in 0..n - 1 {
        a.checkpoint()?;
        let mut j_min = i;
        for j in i + 1..n {
            if a.less(j, j_min) {
                j_min = j;
            }
        }
        a.swap(i, j_min);
    }
    Ok(())
}

pub fn insertion_sort<O: AccessObserver>(a: &mut ItemArray<O>) -> SortResult {
    let n = a.len();
    for i in 1..n {
        a.checkpoint()?;
        let key = a.get(i);
        let mut j = i;
        while j > 0 && a.greater(j - 1, key) {
            a.swap(j - 1, j);
            j -= 1;
        }
    }
    Ok(())
}

pub fn bubble_sort<O: AccessObserver>(a: &mut ItemArray<O>) -> SortResult {
    let n = a.len();
    if n < 2 {
        return Ok(());
    }
    for i in 0..n - 1 {
        a.checkpoint()?;
        for j in 0..n - 1 - i {
            if a.greater(j, j + 1) {
                a.swap(j, j + 1);
            }
        }
    }
    Ok(())
}

pub fn cocktail_shaker_sort<O: AccessObserver>(a: &mut ItemArray<O>) -> SortResult {
    let n = a.len();
    if n < 2 {
        return Ok(());
    }
    let (mut lo, mut hi, mut mov) = (0, n - 1, 0);

    while lo < hi {
        a.checkpoint()?;
        for i in (lo + 1..=hi).rev() {
            if a.greater(i - 1, i) {
                a.swap(i - 1, i);
                mov = i;
            }
        }
        lo = mov;

        for i in lo..hi {
            if a.greater(i, i + 1) {
                a.swap(i, i + 1);
                mov = i;
            }
        }
        hi = mov;
    }
    Ok(())
}

// *** quicksort

/// How a quicksort partition picks its pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotRule {
    First,
    Last,
    Mid,
    Random,
    MedianOfThree,
}

impl PivotRule {
    pub const ALL: [Self; 5] = [
        Self::First,
        Self::Last,
        Self::Mid,
        Self::Random,
        Self::MedianOfThree,
    ];

    /// Pick a rule with the array's random source
    pub fn random<O: AccessObserver>(a: &mut ItemArray<O>) -> Self {
        Self::ALL[a.random(Self::ALL.len())]
    }

    /// Pivot slot within `lo..hi` (`hi` exclusive, range non-empty)
    pub fn select<O: AccessObserver>(self, a: &mut ItemArray<O>, lo: usize, hi: usize) -> usize {
        match self {
            Self::First => lo,
            Self::Last => hi - 1,
            Self::Mid => (lo + hi) / 2,
            Self::Random => lo + a.random(hi - lo),
            Self::MedianOfThree => {
                let mid = (lo + hi) / 2;
                let last = hi - 1;

                if a.equal(lo, mid) {
                    return lo;
                }
                if a.equal(lo, last) || a.equal(mid, last) {
                    return last;
                }

                if a.less(lo, mid) {
                    if a.less(mid, last) {
                        mid
                    } else if a.less(lo, last) {
                        last
                    } else {
                        lo
                    }
                } else if a.greater(mid, last) {
                    mid
                } else if a.less(lo, last) {
                    lo
                } else {
                    last
                }
            }
        }
    }
}

/// Quicksort with Hoare's two-pointer partition; the pivot slot is
/// followed when it gets swapped.
pub fn quick_sort_lr<O: AccessObserver>(a: &mut ItemArray<O>) -> SortResult {
    let rule = PivotRule::random(a);
    quick_sort_lr_with(a, rule)
}

pub fn quick_sort_lr_with<O: AccessObserver>(a: &mut ItemArray<O>, rule: PivotRule) -> SortResult {
    if a.len() < 2 {
        return Ok(());
    }
    quick_sort_lr_range(a, rule, 0, a.len() - 1)
}

#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn quick_sort_lr_range<O: AccessObserver>(
    a: &mut ItemArray<O>,
    rule: PivotRule,
    lo: usize,
    hi: usize,
) -> SortResult {
    a.checkpoint()?;
    let mut p = rule.select(a, lo, hi + 1);

    // j may step one below lo
    let (mut i, mut j) = (lo as isize, hi as isize);

    while i <= j {
        while a.less(i as usize, p) {
            i += 1;
        }
        while a.greater(j as usize, p) {
            j -= 1;
        }
        if i <= j {
            a.swap(i as usize, j as usize);

            if p == i as usize {
                p = j as usize;
            } else if p == j as usize {
                p = i as usize;
            }

            i += 1;
            j -= 1;
        }
    }

    if (lo as isize) < j {
        quick_sort_lr_range(a, rule, lo, j as usize)?;
    }
    if (i as usize) < hi {
        quick_sort_lr_range(a, rule, i as usize, hi)?;
    }
    Ok(())
}

/// Quicksort with Lomuto's partition: the pivot is parked in the last
/// slot of the range and everything not above it is swept to the left.
pub fn quick_sort_ll<O: AccessObserver>(a: &mut ItemArray<O>) -> SortResult {
    let rule = PivotRule::random(a);
    quick_sort_ll_with(a, rule)
}

pub fn quick_sort_ll_with<O: AccessObserver>(a: &mut ItemArray<O>, rule: PivotRule) -> SortResult {
    let n = a.len();
    quick_sort_ll_range(a, rule, 0, n)
}

fn partition_ll<O: AccessObserver>(
    a: &mut ItemArray<O>,
    rule: PivotRule,
    lo: usize,
    hi: usize,
) -> usize {
    let last = hi - 1;
    let p = rule.select(a, lo, hi);
    a.swap(p, last);

    let mut i = lo;
    for j in lo..last {
        if a.less_eq(j, last) {
            a.swap(i, j);
            i += 1;
        }
    }
    a.swap(i, last);
    i
}

fn quick_sort_ll_range<O: AccessObserver>(
    a: &mut ItemArray<O>,
    rule: PivotRule,
    lo: usize,
    hi: usize,
) -> SortResult {
    if lo + 1 < hi {
        a.checkpoint()?;
        let mid = partition_ll(a, rule, lo, hi);
        quick_sort_ll_range(a, rule, lo, mid)?;
        quick_sort_ll_range(a, rule, mid + 1, hi)?;
    }
    Ok(())
}

/// Yaroslavskiy's dual-pivot quicksort.
#[allow(clippy::cast_possible_wrap)]
pub fn quick_sort_dual_pivot<O: AccessObserver>(a: &mut ItemArray<O>) -> SortResult {
    let n = a.len() as isize;
    dual_pivot_range(a, 0, n - 1)
}

#[allow(clippy::cast_sign_loss)]
fn dual_pivot_range<O: AccessObserver>(
    a: &mut ItemArray<O>,
    left: isize,
    right: isize,
) -> SortResult {
    if right <= left {
        return Ok(());
    }
    a.checkpoint()?;

    let at = |index: isize| index as usize;

    if a.greater(at(left), at(right)) {
        a.swap(at(left), at(right));
    }
    let p = a.get(at(left));
    let q = a.get(at(right));

    let mut l = left + 1;
    let mut g = right - 1;
    let mut k = l;

    while k <= g {
        if a.less(at(k), p) {
            a.swap(at(k), at(l));
            l += 1;
        } else if a.greater_eq(at(k), q) {
            while a.greater(at(g), q) && k < g {
                g -= 1;
            }
            a.swap(at(k), at(g));
            g -= 1;

            if a.less(at(k), p) {
                a.swap(at(k), at(l));
                l += 1;
            }
        }
        k += 1;
    }
    l -= 1;
    g += 1;
    a.swap(at(left), at(l));
    a.swap(at(right), at(g));

    dual_pivot_range(a, left, l - 1)?;
    dual_pivot_range(a, l + 1, g - 1)?;
    dual_pivot_range(a, g + 1, right)
}

// *** merge sort

/// Merge the sorted runs `lo..mid` and `mid..hi` through a scratch buffer.
fn merge<O: AccessObserver>(a: &mut ItemArray<O>, lo: usize, mid: usize, hi: usize) {
    let mut out: Vec<Item> = Vec::with_capacity(hi - lo);
    let (mut i, mut j) = (lo, mid);

    while i < mid && j < hi {
        let ai = a.get(i);
        let aj = a.get(j);
        let next = if a.less(ai, aj) {
            i += 1;
            ai
        } else {
            j += 1;
            aj
        };
        out.push(a.make(next.value()));
    }
    while i < mid {
        out.push(a.get(i));
        i += 1;
    }
    while j < hi {
        out.push(a.get(j));
        j += 1;
    }

    for (offset, item) in out.into_iter().enumerate() {
        a.set(lo + offset, item);
    }
}

/// Top-down merge sort.
pub fn merge_sort<O: AccessObserver>(a: &mut ItemArray<O>) -> SortResult {
    let n = a.len();
    merge_sort_range(a, 0, n)
}

fn merge_sort_range<O: AccessObserver>(a: &mut ItemArray<O>, lo: usize, hi: usize) -> SortResult {
    if lo + 1 < hi {
        a.checkpoint()?;
        let mid = (lo + hi) / 2;
        merge_sort_range(a, lo, mid)?;
        merge_sort_range(a, mid, hi)?;
        merge(a, lo, mid, hi);
    }
    Ok(())
}

/// Bottom-up merge sort with doubling run width.
pub fn merge_sort_iterative<O: AccessObserver>(a: &mut ItemArray<O>) -> SortResult {
    let n = a.len();
    let mut width = 1;
    while width < n {
        let mut i = 0;
        while i + width < n {
            a.checkpoint()?;
            merge(a, i, i + width, (i + 2 * width).min(n));
            i += 2 * width;
        }
        width *= 2;
    }
    Ok(())
}

// *** shell, heap and cycle sort

pub fn shell_sort<O: AccessObserver>(a: &mut ItemArray<O>) -> SortResult {
    let n = a.len();
    for &h in &SHELL_GAPS {
        for i in h..n {
            a.checkpoint()?;
            let v = a.get(i);
            let mut j = i;
            while j >= h && a.greater(j - h, v) {
                a.copy(j, j - h);
                j -= h;
            }
            a.set(j, v);
        }
    }
    Ok(())
}

/// Heap sort on an implicit max-heap: build by sifting down every inner
/// node, then repeatedly move the root behind the heap.
pub fn heap_sort<O: AccessObserver>(a: &mut ItemArray<O>) -> SortResult {
    let mut n = a.len();
    let mut i = n / 2;

    loop {
        a.checkpoint()?;
        if i > 0 {
            i -= 1;
        } else {
            if n <= 1 {
                return Ok(());
            }
            n -= 1;
            a.swap(0, n);
        }

        let mut parent = i;
        let mut child = i * 2 + 1;

        while child < n {
            if child + 1 < n && a.greater(child + 1, child) {
                child += 1;
            }
            if a.greater(child, parent) {
                a.swap(parent, child);
                parent = child;
                child = parent * 2 + 1;
            } else {
                break;
            }
        }
    }
}

/// Cycle sort: rotate each cycle of the permutation into place with the
/// minimum number of writes.
pub fn cycle_sort<O: AccessObserver>(a: &mut ItemArray<O>) -> SortResult {
    let n = a.len();
    if n < 2 {
        return Ok(());
    }

    for start in 0..n - 1 {
        loop {
            a.checkpoint()?;

            let mut rank = start;
            for i in start + 1..n {
                if a.less(i, start) {
                    rank += 1;
                }
            }
            if rank == start {
                break;
            }

            // place after any duplicates
            while rank < n && a.equal(start, rank) {
                rank += 1;
            }
            if rank >= n {
                break;
            }
            a.swap(rank, start);
        }
    }
    Ok(())
}

// *** radix sorts

/// Exclusive upper bound of the keys, read without notifying the observer
fn key_span<O: AccessObserver>(a: &ItemArray<O>) -> usize {
    let max = a
        .cells()
        .iter()
        .map(|item| usize::from(item.value()) + 1)
        .max()
        .unwrap_or(0);
    max.max(a.len())
}

fn digit(value: u16, base: usize) -> usize {
    usize::from(value) / base % RADIX
}

/// Radix sort, most significant digit first, redistributing each bucket
/// in place by walking permutation cycles.
pub fn radix_sort_msd<O: AccessObserver>(a: &mut ItemArray<O>) -> SortResult {
    let n = a.len();
    if n < 2 {
        return Ok(());
    }
    // highest digit position present in the keys
    let span = key_span(a);
    let mut levels = 0;
    let mut base = RADIX;
    while base < span {
        levels += 1;
        base *= RADIX;
    }
    radix_msd_range(a, 0, n, 0, levels)
}

fn radix_msd_range<O: AccessObserver>(
    a: &mut ItemArray<O>,
    lo: usize,
    hi: usize,
    depth: u32,
    levels: u32,
) -> SortResult {
    a.checkpoint()?;
    let base = RADIX.pow(levels - depth);

    let mut count = [0usize; RADIX];
    for i in lo..hi {
        count[digit(a.read(i), base)] += 1;
    }

    // inclusive prefix sum: bucket ends
    let mut bucket = [0usize; RADIX];
    let mut sum = 0;
    for (end, c) in bucket.iter_mut().zip(count) {
        sum += c;
        *end = sum;
    }

    let mut i = 0;
    while i < hi - lo {
        loop {
            let r = digit(a.read(lo + i), base);
            bucket[r] -= 1;
            let j = bucket[r];
            if j <= i {
                break;
            }
            a.swap(lo + i, lo + j);
        }
        i += count[digit(a.read(lo + i), base)];
    }

    if depth >= levels {
        return Ok(());
    }

    let mut start = lo;
    for c in count {
        if c > 1 {
            radix_msd_range(a, start, start + c, depth + 1, levels)?;
        }
        start += c;
    }
    Ok(())
}

/// Radix sort, least significant digit first, redistributing stably from
/// a copy of the array on every pass.
pub fn radix_sort_lsd<O: AccessObserver>(a: &mut ItemArray<O>) -> SortResult {
    let n = a.len();
    if n < 2 {
        return Ok(());
    }
    let span = key_span(a);

    let mut base = 1;
    while base < span {
        a.checkpoint()?;

        let mut count = [0usize; RADIX];
        let mut copy = vec![Item::BLACK; n];
        for (i, slot) in copy.iter_mut().enumerate() {
            *slot = a.get(i);
            count[digit(slot.value(), base)] += 1;
        }

        // exclusive prefix sum: bucket starts
        let mut bucket = [0usize; RADIX];
        let mut sum = 0;
        for (start, c) in bucket.iter_mut().zip(count) {
            *start = sum;
            sum += c;
        }

        for item in copy {
            let r = digit(item.value(), base);
            a.set(bucket[r], item);
            bucket[r] += 1;
        }

        base *= RADIX;
    }
    Ok(())
}

// *** bozo sort

/// Swap random pairs until the time budget runs out.
///
/// This is a pause between the real algorithms and is not expected to
/// leave the array sorted. Without a clock, or with one that stops
/// moving for [`BOZO_HEADLESS_ROUNDS`] rounds in a row, it stops early.
pub fn bozo_sort<O: AccessObserver>(a: &mut ItemArray<O>) -> SortResult {
    let n = a.len();
    if n < 2 {
        return Ok(());
    }
    let mut last = a.now();
    let deadline = last.map(|now| now + BOZO_BUDGET);
    let mut rounds = 0;
    let mut stalled = 0;

    loop {
        a.checkpoint()?;
        let now = a.now();
        if now == last {
            stalled += 1;
        } else {
            stalled = 0;
            last = now;
        }
        let expired = match (deadline, now) {
            (Some(deadline), Some(now)) => now >= deadline,
            _ => false,
        };
        if expired || stalled > BOZO_HEADLESS_ROUNDS {
            break;
        }

        for _ in 0..4 {
            let i = a.random(n);
            let j = a.random(n);
            a.swap(i, j);
        }
        rounds += 1;
    }

    #[cfg(feature = "esp32-log")]
    println!("[bozo] {} rounds", rounds);

    Ok(())
}

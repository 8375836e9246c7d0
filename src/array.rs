//! Instrumented array.
//!
//! [`ItemArray`] owns the cells an algorithm works on and reports every
//! construction, assignment, comparison and increment to a single
//! [`AccessObserver`]. Algorithms see nothing but this type, so the same
//! code runs headless, under a recording observer in tests, or behind an
//! [`AnimationDriver`](crate::driver::AnimationDriver) lighting up a strip.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

use embassy_time::{Duration, Instant};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::item::{Access, BLACK, Item, MAX_ITEMS, Operand, Value};

/// Receives every access made through an [`ItemArray`].
pub trait AccessObserver {
    /// A cell or a detached item was touched. `cells` is the array state
    /// after the access.
    fn on_access(&mut self, cells: &[Item], access: Access);

    /// A comparison was made; `count` is the running total
    fn on_comparison(&mut self, _count: usize) {}

    /// The algorithm asked for an explicit pause between steps
    fn on_pause(&mut self, _duration: Duration) {}

    /// True once the algorithm should stop at its next checkpoint
    fn is_interrupted(&self) -> bool {
        false
    }

    /// Wall clock, for algorithms that run on a time budget
    fn now(&self) -> Option<Instant> {
        None
    }
}

/// Headless observer: every access is dropped.
impl AccessObserver for () {
    fn on_access(&mut self, _cells: &[Item], _access: Access) {}
}

impl<O: AccessObserver + ?Sized> AccessObserver for &mut O {
    fn on_access(&mut self, cells: &[Item], access: Access) {
        (**self).on_access(cells, access);
    }

    fn on_comparison(&mut self, count: usize) {
        (**self).on_comparison(count);
    }

    fn on_pause(&mut self, duration: Duration) {
        (**self).on_pause(duration);
    }

    fn is_interrupted(&self) -> bool {
        (**self).is_interrupted()
    }

    fn now(&self) -> Option<Instant> {
        (**self).now()
    }
}

/// An algorithm stopped early because its run was interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

/// Requested array length leaves no room for the [`BLACK`] sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooManyItems(pub usize);

/// Array of observed cells plus the run state algorithms need.
pub struct ItemArray<O: AccessObserver = ()> {
    cells: Vec<Item>,
    observer: O,
    rng: SmallRng,
    comparisons: usize,
}

impl<O: AccessObserver> ItemArray<O> {
    /// Allocate `len` empty cells.
    ///
    /// `seed` drives every random choice made through [`Self::random`], so
    /// two arrays with the same seed replay identical runs.
    pub fn new(len: usize, observer: O, seed: u64) -> Result<Self, TooManyItems> {
        if len > MAX_ITEMS {
            return Err(TooManyItems(len));
        }
        Ok(Self {
            cells: vec![Item::BLACK; len],
            observer,
            rng: SmallRng::seed_from_u64(seed),
            comparisons: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell contents, without notifying the observer
    pub fn cells(&self) -> &[Item] {
        &self.cells
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Cells and observer at once, for flushing after a run
    pub fn parts_mut(&mut self) -> (&[Item], &mut O) {
        (&self.cells, &mut self.observer)
    }

    /// Install a new observer, returning the previous one
    pub fn replace_observer(&mut self, observer: O) -> O {
        core::mem::replace(&mut self.observer, observer)
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Observed comparisons since construction or the last reset
    pub fn comparisons(&self) -> usize {
        self.comparisons
    }

    pub fn reset_comparisons(&mut self) {
        self.comparisons = 0;
    }

    fn notify(&mut self, access: Access) {
        self.observer.on_access(&self.cells, access);
    }

    fn operand_value(&self, operand: Operand) -> Value {
        match operand {
            Operand::Slot(index) => self.cells[index].value(),
            Operand::Held(item) => item.value(),
        }
    }

    fn operand_slot(operand: Operand) -> Option<usize> {
        match operand {
            Operand::Slot(index) => Some(index),
            Operand::Held(_) => None,
        }
    }

    // *** observed operations

    /// Plain magnitude of a cell (paced)
    pub fn read(&mut self, index: usize) -> Value {
        let value = self.cells[index].value();
        self.notify(Access::paced(Some(index), value));
        value
    }

    /// Copy a cell into a detached item (paced)
    pub fn get(&mut self, index: usize) -> Item {
        let item = self.cells[index];
        self.notify(Access::paced(None, item.value()));
        item
    }

    /// Construct a detached item (paced)
    pub fn make(&mut self, value: Value) -> Item {
        self.notify(Access::paced(None, value));
        Item::new(value)
    }

    /// Assign a cell (paced)
    pub fn set(&mut self, index: usize, item: Item) {
        self.cells[index] = item;
        self.notify(Access::paced(Some(index), item.value()));
    }

    /// `cells[dst] = cells[src]` (paced)
    pub fn copy(&mut self, dst: usize, src: usize) {
        let item = self.cells[src];
        self.set(dst, item);
    }

    /// Exchange two cells through a temporary (paced)
    pub fn swap(&mut self, i: usize, j: usize) {
        let tmp = self.get(i);
        self.copy(i, j);
        self.set(j, tmp);
    }

    /// Exchange a held item with a cell (paced)
    pub fn exchange(&mut self, held: &mut Item, index: usize) {
        let tmp = self.make(held.value());
        *held = self.get(index);
        self.set(index, tmp);
    }

    pub fn increment(&mut self, index: usize) {
        let value = self.cells[index].value().wrapping_add(1);
        self.cells[index].set(value);
        self.notify(Access::paced(Some(index), value));
    }

    pub fn decrement(&mut self, index: usize) {
        let value = self.cells[index].value().wrapping_sub(1);
        self.cells[index].set(value);
        self.notify(Access::paced(Some(index), value));
    }

    /// Three-way comparison reporting both operands (paced)
    pub fn compare(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> Ordering {
        let (a, b) = (a.into(), b.into());
        let (va, vb) = (self.operand_value(a), self.operand_value(b));

        self.comparisons += 1;
        self.notify(Access::paced(Self::operand_slot(a), va));
        self.notify(Access::paced(Self::operand_slot(b), vb));
        self.observer.on_comparison(self.comparisons);

        va.cmp(&vb)
    }

    pub fn less(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    pub fn less_eq(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> bool {
        self.compare(a, b) != Ordering::Greater
    }

    pub fn greater(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    pub fn greater_eq(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> bool {
        self.compare(a, b) != Ordering::Less
    }

    pub fn equal(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    pub fn not_equal(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> bool {
        self.compare(a, b) != Ordering::Equal
    }

    // *** silent operations

    /// Assign a cell without delay or highlight
    pub fn set_silent(&mut self, index: usize, item: Item) {
        self.cells[index] = item;
        self.notify(Access::silent(Some(index), item.value()));
    }

    /// Exchange two cells through three silent assignments
    pub fn swap_silent(&mut self, i: usize, j: usize) {
        let tmp = self.cells[i];
        self.notify(Access::silent(None, tmp.value()));
        let other = self.cells[j];
        self.set_silent(i, other);
        self.set_silent(j, tmp);
    }

    /// Fill with a uniformly shuffled permutation of `0..len`
    #[allow(clippy::cast_possible_truncation)]
    pub fn randomize(&mut self) {
        let n = self.len();
        for i in 0..n {
            self.set_silent(i, Item::new(i as Value));
        }
        for i in 0..n {
            let j = i + self.random(n - i);
            self.swap_silent(i, j);
        }
    }

    /// Fill with `0..len` in ascending order
    #[allow(clippy::cast_possible_truncation)]
    pub fn fill_sorted(&mut self) {
        for i in 0..self.len() {
            self.set_silent(i, Item::new(i as Value));
        }
    }

    /// Fill with `0..len` in descending order
    #[allow(clippy::cast_possible_truncation)]
    pub fn fill_reversed(&mut self) {
        let n = self.len();
        for i in 0..n {
            self.set_silent(i, Item::new((n - 1 - i) as Value));
        }
    }

    /// Reverse the current contents
    pub fn reverse_silent(&mut self) {
        let n = self.len();
        for i in 0..n / 2 {
            self.swap_silent(i, n - 1 - i);
        }
    }

    /// Mark every cell as empty
    pub fn blacken(&mut self) {
        for i in 0..self.len() {
            self.set_silent(i, Item::BLACK);
        }
    }

    /// Non-decreasing order check that is never reported
    pub fn is_sorted(&self) -> bool {
        self.cells.windows(2).all(|w| !w[0].greater_direct(w[1]))
    }

    /// Blank out the left cell of every inversion and return how many
    /// were found. Comparisons are silent, the blanking is not delayed.
    pub fn mark_unsorted(&mut self) -> usize {
        let mut marked = 0;
        for i in 1..self.len() {
            if self.cells[i - 1].greater_direct(self.cells[i]) {
                self.set_silent(i - 1, Item::new(BLACK));
                marked += 1;
            }
        }
        marked
    }

    // *** run control

    /// Stop point for long-running loops
    pub fn checkpoint(&self) -> Result<(), Interrupted> {
        if self.observer.is_interrupted() {
            Err(Interrupted)
        } else {
            Ok(())
        }
    }

    /// Ask the observer for an explicit pause
    pub fn pause(&mut self, duration: Duration) {
        self.observer.on_pause(duration);
    }

    /// Uniform random number in `0..limit` (0 when `limit` is 0)
    pub fn random(&mut self, limit: usize) -> usize {
        if limit == 0 {
            return 0;
        }
        self.rng.gen_range(0..limit)
    }

    pub fn now(&self) -> Option<Instant> {
        self.observer.now()
    }
}

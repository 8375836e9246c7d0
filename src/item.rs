//! Values stored in an observed array.

/// Magnitude held by one array cell
pub type Value = u16;

/// Magnitude reserved for "empty slot"; never a valid key
pub const BLACK: Value = Value::MAX;

/// Largest number of cells an array may hold so that every key in
/// `0..len` stays below [`BLACK`]
pub const MAX_ITEMS: usize = BLACK as usize;

/// A detached copy of a cell value.
///
/// Algorithms hold `Item`s for keys, pivots and merge buffers. Creating or
/// copying one through [`ItemArray`](crate::array::ItemArray) is reported to
/// the observer; the plain accessors below are silent and meant for
/// bookkeeping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item(Value);

impl Item {
    /// The empty-slot item
    pub const BLACK: Self = Self(BLACK);

    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Raw magnitude without notifying anyone
    pub const fn value(self) -> Value {
        self.0
    }

    pub const fn is_black(self) -> bool {
        self.0 == BLACK
    }

    pub(crate) fn set(&mut self, value: Value) {
        self.0 = value;
    }

    /// Silent equality
    pub const fn equal_direct(self, other: Self) -> bool {
        self.0 == other.0
    }

    /// Silent less-than
    pub const fn less_direct(self, other: Self) -> bool {
        self.0 < other.0
    }

    /// Silent greater-than
    pub const fn greater_direct(self, other: Self) -> bool {
        self.0 > other.0
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Value> for Item {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// One side of an observed comparison: a cell of the array or a held item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Slot(usize),
    Held(Item),
}

impl From<usize> for Operand {
    fn from(index: usize) -> Self {
        Self::Slot(index)
    }
}

impl From<Item> for Operand {
    fn from(item: Item) -> Self {
        Self::Held(item)
    }
}

impl From<&Item> for Operand {
    fn from(item: &Item) -> Self {
        Self::Held(*item)
    }
}

/// A single reported access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    /// Array cell touched, `None` for a detached item
    pub slot: Option<usize>,
    /// Magnitude after the access
    pub value: Value,
    /// Whether the access should be shown with a delay
    pub paced: bool,
}

impl Access {
    pub const fn paced(slot: Option<usize>, value: Value) -> Self {
        Self {
            slot,
            value,
            paced: true,
        }
    }

    pub const fn silent(slot: Option<usize>, value: Value) -> Self {
        Self {
            slot,
            value,
            paced: false,
        }
    }
}

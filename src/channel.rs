//! Bounded queue shared between execution contexts.
//!
//! Built on `critical-section` and `heapless::Deque`, so it can be placed in
//! a `static` and touched from an interrupt handler, an audio callback
//! thread or the animation loop alike. Used for control intents flowing
//! into the animation loop and for array-access events flowing out of it.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Error returned when trying to send to a full channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// A bounded, thread-safe channel backed by a fixed-size deque.
pub struct Channel<T, const SIZE: usize> {
    inner: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    /// Create a new empty channel.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for this channel.
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Get a receiver handle for this channel.
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Try to send a value into the channel.
    ///
    /// Returns `Err(TrySendError(value))` if the channel is full.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(value).map_err(TrySendError)
        })
    }

    /// Try to receive a value from the channel.
    ///
    /// Returns `Err(TryReceiveError)` if the channel is empty.
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }

    /// Take every queued value inside a single critical section.
    ///
    /// Returns the number of values handed to `f`.
    pub fn drain(&self, mut f: impl FnMut(T)) -> usize {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            let mut count = 0;
            while let Some(value) = queue.pop_front() {
                f(value);
                count += 1;
            }
            count
        })
    }

    /// Drop all queued values.
    pub fn clear(&self) {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().clear());
    }

    /// Number of queued values.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender handle for a [`Channel`].
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    /// Try to send a value into the channel.
    ///
    /// Returns `Err(TrySendError(value))` if the channel is full.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

/// A receiver handle for a [`Channel`].
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    /// Try to receive a value from the channel.
    ///
    /// Returns `Err(TryReceiveError)` if the channel is empty.
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.channel.try_receive()
    }

    /// See [`Channel::drain`].
    pub fn drain(&self, f: impl FnMut(T)) -> usize {
        self.channel.drain(f)
    }
}

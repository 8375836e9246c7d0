//! Hash table insertion schemes over an [`ItemArray`].
//!
//! The array is the table: [`BLACK`] marks a free slot. Each scheme inserts
//! the keys `0..n` in a randomly rotated order into a table of `n` slots.
//! Quadratic probing and both cuckoo variants give up on a single key once
//! its probe or displacement count reaches the table size, so a run always
//! terminates even when the table cannot take every key.

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    array::{AccessObserver, Interrupted, ItemArray},
    item::{BLACK, Item, Value},
};

/// Pause after each linear probing insertion
pub const LINEAR_PROBE_PAUSE: Duration = Duration::from_millis(25);

/// Integer mixing function shared by all schemes.
pub const fn mix_hash(mut a: u32) -> u32 {
    a = a.wrapping_add(0x7ed5_5d16).wrapping_add(a << 12);
    a = (a ^ 0xc761_c23c) ^ (a >> 19);
    a = a.wrapping_add(0x1656_67b1).wrapping_add(a << 5);
    a = a.wrapping_add(0xd3a2_646c) ^ (a << 9);
    a = a.wrapping_add(0xfd70_46c5).wrapping_add(a << 3);
    a = (a ^ 0xb55a_4f09) ^ (a >> 16);
    a
}

fn slot(hash: u32, shift: u32, n: usize) -> usize {
    (hash >> shift) as usize % n
}

/// Candidate slot `choice` of the two-choice cuckoo table
fn cuckoo_two_slot(choice: usize, value: Value, n: usize) -> usize {
    let shift = if choice == 0 { 2 } else { 15 };
    slot(mix_hash(u32::from(value)), shift, n)
}

/// Candidate slot `choice` of the three-choice cuckoo table
fn cuckoo_three_slot(choice: usize, value: Value, n: usize) -> usize {
    let shift = match choice {
        0 => 2,
        1 => 7,
        _ => 15,
    };
    slot(mix_hash(u32::from(value)), shift, n)
}

/// Next key of the rotated insertion order
#[allow(clippy::cast_possible_truncation)]
fn next_key<O: AccessObserver>(a: &mut ItemArray<O>, i: usize, shift: usize) -> Item {
    let n = a.len();
    a.make(((i + shift) % n) as Value)
}

fn is_free<O: AccessObserver>(a: &mut ItemArray<O>, index: usize) -> bool {
    a.read(index) == BLACK
}

/// Number of keys a scheme had to give up on
pub type Abandoned = usize;

pub fn linear_probing<O: AccessObserver>(a: &mut ItemArray<O>) -> Result<Abandoned, Interrupted> {
    let n = a.len();
    if n == 0 {
        return Ok(0);
    }
    let shift = a.random(n);

    for i in 0..n {
        a.checkpoint()?;
        let key = next_key(a, i, shift);

        let mut index = slot(mix_hash(u32::from(key.value())), 2, n);
        // n keys into n slots: a free one always exists
        while !is_free(a, index) {
            index = (index + 1) % n;
        }
        a.set(index, key);
        a.pause(LINEAR_PROBE_PAUSE);
    }
    Ok(0)
}

#[allow(clippy::cast_possible_truncation)]
pub fn quadratic_probing<O: AccessObserver>(
    a: &mut ItemArray<O>,
) -> Result<Abandoned, Interrupted> {
    let n = a.len();
    if n == 0 {
        return Ok(0);
    }
    let shift = a.random(n);
    let mut abandoned = 0;

    for i in 0..n {
        a.checkpoint()?;
        let key = next_key(a, i, shift);

        let mut index = slot(mix_hash(u32::from(key.value())), 2, n);
        let mut probe: u64 = 0;
        let mut placed = true;
        while !is_free(a, index) {
            let step = (probe + probe * probe) / 2;
            index = ((index as u64 + step) % n as u64) as usize;
            probe += 1;
            if probe == n as u64 {
                placed = false;
                break;
            }
        }

        if placed {
            a.set(index, key);
        } else {
            abandoned += 1;
        }
    }

    #[cfg(feature = "esp32-log")]
    if abandoned > 0 {
        println!("[hash] quadratic probing abandoned {} keys", abandoned);
    }

    Ok(abandoned)
}

pub fn cuckoo_two<O: AccessObserver>(a: &mut ItemArray<O>) -> Result<Abandoned, Interrupted> {
    let n = a.len();
    if n == 0 {
        return Ok(0);
    }
    let shift = a.random(n);
    let mut abandoned = 0;

    'keys: for i in 0..n {
        a.checkpoint()?;
        let mut held = next_key(a, i, shift);

        for choice in 0..2 {
            let index = cuckoo_two_slot(choice, held.value(), n);
            if is_free(a, index) {
                a.set(index, held);
                continue 'keys;
            }
        }

        let mut choice = 1;
        let mut rounds = 0;
        loop {
            let index = cuckoo_two_slot(choice, held.value(), n);
            a.exchange(&mut held, index);
            if held.is_black() {
                break;
            }

            // evicted from its own `choice` slot: move it to the other one
            if cuckoo_two_slot(choice, held.value(), n) == index {
                choice = (choice + 1) % 2;
            }

            rounds += 1;
            if rounds >= n {
                abandoned += 1;
                break;
            }
        }
    }

    #[cfg(feature = "esp32-log")]
    if abandoned > 0 {
        println!("[hash] cuckoo two abandoned {} keys", abandoned);
    }

    Ok(abandoned)
}

pub fn cuckoo_three<O: AccessObserver>(a: &mut ItemArray<O>) -> Result<Abandoned, Interrupted> {
    let n = a.len();
    if n == 0 {
        return Ok(0);
    }
    let shift = a.random(n);
    let mut abandoned = 0;

    'keys: for i in 0..n {
        a.checkpoint()?;
        let mut held = next_key(a, i, shift);

        for choice in 0..3 {
            let index = cuckoo_three_slot(choice, held.value(), n);
            if is_free(a, index) {
                a.set(index, held);
                continue 'keys;
            }
        }

        // all three candidates taken, displace a random one
        let choice = a.random(3);
        let mut index = cuckoo_three_slot(choice, held.value(), n);
        a.exchange(&mut held, index);

        let mut rounds = 0;
        loop {
            let mut choice = a.random(2);
            if cuckoo_three_slot(choice, held.value(), n) == index {
                choice = 2;
            }

            index = cuckoo_three_slot(choice, held.value(), n);
            a.exchange(&mut held, index);
            if held.is_black() {
                break;
            }

            rounds += 1;
            if rounds >= n {
                abandoned += 1;
                break;
            }
        }
    }

    #[cfg(feature = "esp32-log")]
    if abandoned > 0 {
        println!("[hash] cuckoo three abandoned {} keys", abandoned);
    }

    Ok(abandoned)
}

mod tests {
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration as StdDuration;

    use algo_light_composer::{
        AccessObserver, Interrupted, ItemArray,
        algorithm::hash::{self, Abandoned, mix_hash},
        item::{Access, BLACK, Item, Value},
    };

    type Insert = fn(&mut ItemArray) -> Result<Abandoned, Interrupted>;

    const SCHEMES: [(&str, Insert); 4] = [
        ("linear_probing", hash::linear_probing::<()>),
        ("quadratic_probing", hash::quadratic_probing::<()>),
        ("cuckoo_two", hash::cuckoo_two::<()>),
        ("cuckoo_three", hash::cuckoo_three::<()>),
    ];

    const SIZES: [usize; 6] = [1, 2, 3, 7, 64, 300];

    /// Run `f` on another thread and fail if it does not return in time.
    fn within_timeout<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(f());
        });
        rx.recv_timeout(StdDuration::from_secs(20))
            .expect("insertion did not terminate")
    }

    fn run(insert: Insert, n: usize, seed: u64) -> (Vec<Value>, Abandoned) {
        within_timeout(move || {
            let mut a = ItemArray::new(n, (), seed).unwrap();
            a.blacken();
            let abandoned = insert(&mut a).unwrap();
            let cells = a.cells().iter().map(|item| item.value()).collect();
            (cells, abandoned)
        })
    }

    #[test]
    fn test_every_scheme_terminates_and_keeps_keys_unique() {
        for (name, insert) in SCHEMES {
            for n in SIZES {
                for seed in 0..4 {
                    let (cells, abandoned) = run(insert, n, seed);
                    let mut keys: Vec<Value> =
                        cells.iter().copied().filter(|&v| v != BLACK).collect();

                    assert_eq!(keys.len(), n - abandoned, "{} n={} seed={}", name, n, seed);
                    keys.sort_unstable();
                    keys.dedup();
                    assert_eq!(keys.len(), n - abandoned, "{} stored a key twice", name);
                    assert!(keys.iter().all(|&k| usize::from(k) < n));
                }
            }
        }
    }

    #[test]
    fn test_linear_probing_is_complete() {
        for n in SIZES {
            let (cells, abandoned) = run(hash::linear_probing::<()>, n, 1);
            assert_eq!(abandoned, 0);
            let mut keys = cells;
            keys.sort_unstable();
            assert_eq!(keys, (0..n as Value).collect::<Vec<Value>>());
        }
    }

    #[test]
    fn test_empty_table() {
        for (_, insert) in SCHEMES {
            let mut a = ItemArray::new(0, (), 0).unwrap();
            assert_eq!(insert(&mut a), Ok(0));
        }
    }

    #[test]
    fn test_mix_hash_is_deterministic() {
        assert_eq!(mix_hash(12345), mix_hash(12345));
        assert_ne!(mix_hash(1), mix_hash(2));
    }

    /// Counts pauses and interrupts after the first one
    #[derive(Default)]
    struct PauseCounter {
        pauses: usize,
    }

    impl AccessObserver for PauseCounter {
        fn on_access(&mut self, _cells: &[Item], _access: Access) {}

        fn on_pause(&mut self, _duration: embassy_time::Duration) {
            self.pauses += 1;
        }

        fn is_interrupted(&self) -> bool {
            self.pauses >= 1
        }
    }

    #[test]
    fn test_linear_probing_pauses_and_stops() {
        let mut a = ItemArray::new(20, PauseCounter::default(), 0).unwrap();
        a.blacken();
        assert_eq!(hash::linear_probing(&mut a), Err(Interrupted));
        assert_eq!(a.observer().pauses, 1);
        let stored = a.cells().iter().filter(|item| !item.is_black()).count();
        assert_eq!(stored, 1);
    }
}

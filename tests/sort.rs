mod tests {
    use algo_light_composer::{
        AccessObserver, AlgorithmId, AlgorithmKind, Interrupted, ItemArray,
        algorithm::sort::{self, BOZO_HEADLESS_ROUNDS, PivotRule},
        item::{Access, Item, Value},
    };

    const SIZES: [usize; 5] = [0, 1, 2, 16, 300];

    #[derive(Default)]
    struct Counter {
        accesses: usize,
        interrupted: bool,
    }

    impl AccessObserver for Counter {
        fn on_access(&mut self, _cells: &[Item], access: Access) {
            if access.paced {
                self.accesses += 1;
            }
        }

        fn is_interrupted(&self) -> bool {
            self.interrupted
        }
    }

    fn sorts() -> impl Iterator<Item = AlgorithmId> {
        AlgorithmId::ALL
            .into_iter()
            .filter(|id| id.kind() == AlgorithmKind::Sort && *id != AlgorithmId::Bozo)
    }

    fn assert_sorted_permutation<O: AccessObserver>(a: &ItemArray<O>, name: &str) {
        let values: Vec<Value> = a.cells().iter().map(|item| item.value()).collect();
        let expected: Vec<Value> = (0..a.len() as Value).collect();
        assert_eq!(values, expected, "{} on {} items", name, a.len());
    }

    #[test]
    fn test_every_sort_sorts() {
        for id in sorts() {
            for n in SIZES {
                for seed in 0..3 {
                    let mut a = ItemArray::new(n, (), seed).unwrap();
                    a.randomize();
                    id.apply(&mut a).unwrap();
                    assert!(a.is_sorted(), "{} on {} items", id.as_str(), n);
                    assert_sorted_permutation(&a, id.as_str());
                }
            }
        }
    }

    #[test]
    fn test_sorts_handle_sorted_and_reversed_input() {
        for id in sorts() {
            let mut a = ItemArray::new(64, (), 5).unwrap();
            a.fill_sorted();
            id.apply(&mut a).unwrap();
            assert_sorted_permutation(&a, id.as_str());

            a.fill_reversed();
            id.apply(&mut a).unwrap();
            assert_sorted_permutation(&a, id.as_str());
        }
    }

    #[test]
    fn test_quicksort_pivot_rules() {
        for rule in PivotRule::ALL {
            for n in SIZES {
                let mut a = ItemArray::new(n, (), 9).unwrap();
                a.randomize();
                sort::quick_sort_lr_with(&mut a, rule).unwrap();
                assert_sorted_permutation(&a, "quick_sort_lr");

                a.randomize();
                sort::quick_sort_ll_with(&mut a, rule).unwrap();
                assert_sorted_permutation(&a, "quick_sort_ll");
            }
        }
    }

    #[test]
    fn test_sorted_input_is_never_more_work() {
        let ids = [
            AlgorithmId::Selection,
            AlgorithmId::Insertion,
            AlgorithmId::Bubble,
            AlgorithmId::CocktailShaker,
            AlgorithmId::Merge,
            AlgorithmId::Shell,
            AlgorithmId::Cycle,
        ];
        for id in ids {
            let mut sorted = ItemArray::new(48, Counter::default(), 1).unwrap();
            sorted.fill_sorted();
            id.apply(&mut sorted).unwrap();

            let mut reversed = ItemArray::new(48, Counter::default(), 1).unwrap();
            reversed.fill_reversed();
            id.apply(&mut reversed).unwrap();

            assert!(
                reversed.observer().accesses >= sorted.observer().accesses,
                "{}",
                id.as_str()
            );
        }
    }

    #[test]
    fn test_adaptive_sorts_on_sorted_input() {
        let mut a = ItemArray::new(32, (), 0).unwrap();
        a.fill_sorted();
        sort::insertion_sort(&mut a).unwrap();
        assert_eq!(a.comparisons(), 31);

        a.reset_comparisons();
        sort::bubble_sort(&mut a).unwrap();
        assert_eq!(a.comparisons(), 32 * 31 / 2);
    }

    #[test]
    fn test_interrupted_sorts_stop() {
        for id in AlgorithmId::ALL
            .into_iter()
            .filter(|id| id.kind() == AlgorithmKind::Sort)
        {
            let observer = Counter {
                accesses: 0,
                interrupted: true,
            };
            let mut a = ItemArray::new(16, observer, 2).unwrap();
            a.randomize();
            assert_eq!(id.apply(&mut a), Err(Interrupted), "{}", id.as_str());
        }
    }

    #[test]
    fn test_bozo_sort_headless_rounds() {
        let mut a = ItemArray::new(10, Counter::default(), 4).unwrap();
        a.randomize();
        sort::bozo_sort(&mut a).unwrap();
        // four observed swaps of three steps each per round
        assert_eq!(a.observer().accesses, BOZO_HEADLESS_ROUNDS * 4 * 3);

        let mut values: Vec<Value> = a.cells().iter().map(|item| item.value()).collect();
        values.sort_unstable();
        assert_eq!(values, (0..10).collect::<Vec<Value>>());
    }

    #[test]
    fn test_radix_sorts_with_duplicates() {
        let input: [Value; 12] = [3, 3, 0, 9, 9, 1, 7, 7, 7, 2, 0, 11];
        let mut expected = input.to_vec();
        expected.sort_unstable();

        for radix in [sort::radix_sort_msd::<()>, sort::radix_sort_lsd::<()>] {
            let mut a = ItemArray::new(input.len(), (), 0).unwrap();
            for (i, &value) in input.iter().enumerate() {
                a.set_silent(i, Item::new(value));
            }
            radix(&mut a).unwrap();
            let values: Vec<Value> = a.cells().iter().map(|item| item.value()).collect();
            assert_eq!(values, expected);
        }
    }
}

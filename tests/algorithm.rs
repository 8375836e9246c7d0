mod tests {
    use core::cell::Cell;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration as StdDuration;

    use algo_light_composer::{
        AlgorithmId, AlgorithmKind, Clock, Duration, FlashPalette, FrameBuffer, HuePalette,
        Instant, ItemArray, OutputDriver, Rgb, RunConfig, RunOutcome, TooManyItems,
        algorithm::sat::{self, clauses_for, variables_for},
        driver::{NEGATIVE_LITERAL, Pacing},
        item::BLACK,
        run_algorithm, run_sat, run_sort,
    };

    struct NullOutput;

    impl OutputDriver for NullOutput {
        fn write(&mut self, _colors: &[Rgb]) {}
    }

    /// Every sleep advances time by at least a millisecond, so time-boxed
    /// algorithms finish even with zero pacing delays.
    #[derive(Default)]
    struct TickingClock {
        micros: Cell<u64>,
    }

    impl Clock for TickingClock {
        fn now(&self) -> Instant {
            Instant::from_micros(self.micros.get())
        }

        fn delay(&self, duration: Duration) {
            let step = duration.as_micros().max(1000);
            self.micros.set(self.micros.get() + step);
        }
    }

    /// Time moves only by the exact amount slept
    #[derive(Default)]
    struct ExactClock {
        micros: Cell<u64>,
    }

    impl Clock for ExactClock {
        fn now(&self) -> Instant {
            Instant::from_micros(self.micros.get())
        }

        fn delay(&self, duration: Duration) {
            self.micros.set(self.micros.get() + duration.as_micros());
        }
    }

    #[test]
    fn test_catalogue_round_trip() {
        for (index, id) in AlgorithmId::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(id.raw()), index);
            assert_eq!(AlgorithmId::from_raw(id.raw()), Some(id));
            assert_eq!(AlgorithmId::parse_from_str(id.as_str()), Some(id));
            assert!(!id.display_name().is_empty());
        }
        assert_eq!(AlgorithmId::from_raw(200), None);
        assert_eq!(AlgorithmId::parse_from_str("stooge"), None);
        assert_eq!(AlgorithmId::LawaSat.next(), AlgorithmId::Selection);
        assert_eq!(AlgorithmId::Selection.next(), AlgorithmId::Insertion);
    }

    #[test]
    fn test_catalogue_kinds_and_pacing() {
        assert_eq!(AlgorithmId::Heap.kind(), AlgorithmKind::Sort);
        assert_eq!(AlgorithmId::CuckooTwo.kind(), AlgorithmKind::Hash);
        assert_eq!(AlgorithmId::LawaSat.kind(), AlgorithmKind::Sat);

        assert_eq!(AlgorithmId::Bubble.default_pacing(), Pacing::batched(60));
        assert_eq!(
            AlgorithmId::Cycle.default_pacing(),
            Pacing::per_event(Duration::from_millis(16))
        );
        assert_eq!(
            AlgorithmId::LinearProbing.default_pacing(),
            Pacing::per_event(Duration::from_ticks(0))
        );
    }

    #[test]
    fn test_every_catalogue_entry_completes() {
        for id in AlgorithmId::ALL {
            let clock = TickingClock::default();
            let mut strip = FrameBuffer::<NullOutput, 48>::new(NullOutput, 48);
            let outcome = run_algorithm(id, &mut strip, &clock, (), 5).unwrap();
            assert_eq!(outcome, RunOutcome::Completed, "{}", id.as_str());
            assert!(strip.shows() > 0);
        }
    }

    #[test]
    fn test_bozo_stops_when_time_stands_still() {
        // zero-delay pacing never moves an exact clock
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let clock = ExactClock::default();
            let mut strip = FrameBuffer::<NullOutput, 300>::new(NullOutput, 300);
            let outcome = run_algorithm(AlgorithmId::Bozo, &mut strip, &clock, (), 5);
            let _ = tx.send(outcome);
        });
        let outcome = rx
            .recv_timeout(StdDuration::from_secs(60))
            .expect("bozo sort did not terminate");
        assert_eq!(outcome, Ok(RunOutcome::Completed));
    }

    #[test]
    fn test_sorted_strip_shows_a_hue_ramp() {
        let clock = TickingClock::default();
        let mut strip = FrameBuffer::<NullOutput, 40>::new(NullOutput, 40).with_intensity(255);
        let outcome = run_algorithm(AlgorithmId::Merge, &mut strip, &clock, (), 8).unwrap();
        assert_eq!(outcome, RunOutcome::Completed);

        let palette = HuePalette::default();
        for (i, &pixel) in strip.pixels().iter().enumerate() {
            assert_eq!(pixel, palette.low(i, i as u16, 40, 255));
        }
    }

    #[test]
    fn test_broken_sort_is_marked() {
        let clock = TickingClock::default();
        let mut strip = FrameBuffer::<NullOutput, 16>::new(NullOutput, 16).with_intensity(255);
        let config = RunConfig::new(Pacing::batched(4), 3);
        let outcome = run_sort(&mut strip, &clock, (), "noop", &config, |_| Ok(())).unwrap();
        assert_eq!(outcome, RunOutcome::Completed);
        // a shuffled array has inversions, their left cells are blanked
        assert!(strip.pixels().iter().any(|&pixel| pixel == Rgb::default()));
    }

    #[test]
    fn test_oversized_strip_is_rejected() {
        struct Huge;

        impl algo_light_composer::LedStrip for Huge {
            fn size(&self) -> usize {
                usize::from(u16::MAX) + 1
            }

            fn pixel(&self, _index: usize) -> Rgb {
                Rgb::default()
            }

            fn set_pixel(&mut self, _index: usize, _color: Rgb) {}

            fn show(&mut self) {}

            fn intensity(&self) -> u8 {
                255
            }

            fn set_intensity(&mut self, _intensity: u8) {}
        }

        let result = run_algorithm(AlgorithmId::Bubble, Huge, TickingClock::default(), (), 0);
        assert_eq!(result, Err(TooManyItems(65_536)));
    }

    #[test]
    fn test_sat_layout_sizes() {
        assert_eq!(variables_for(10), 0);
        assert_eq!(variables_for(300), 57);
        assert_eq!(variables_for(10_000), sat::MAX_VARIABLES);
        for len in [20, 52, 300, 1000] {
            let variables = variables_for(len);
            assert!(variables + clauses_for(variables) <= len);
        }
    }

    #[test]
    fn test_sat_search_keeps_counters_consistent() {
        let n = 300;
        let mut a = ItemArray::new(n, (), 21).unwrap();
        a.blacken();
        let unsatisfied = sat::lawa_sat(&mut a).unwrap();

        let variables = variables_for(n);
        let clauses = clauses_for(variables);
        let cells = a.cells();

        for (i, item) in cells[..variables].iter().enumerate() {
            let var = item.value() & !NEGATIVE_LITERAL;
            assert_eq!(usize::from(var), i + 1);
        }
        let counters = &cells[variables..variables + clauses];
        assert!(counters.iter().all(|item| item.value() <= 3));
        let zero = counters.iter().filter(|item| item.value() == 0).count();
        assert_eq!(zero, unsatisfied);
        assert!(cells[variables + clauses..].iter().all(|item| item.value() == BLACK));
    }

    #[test]
    fn test_run_sat_on_small_strip() {
        let clock = TickingClock::default();
        let mut strip = FrameBuffer::<NullOutput, 8>::new(NullOutput, 8);
        let config = RunConfig::new(Pacing::batched(8), 0);
        let outcome = run_sat(&mut strip, &clock, (), &config).unwrap();
        assert_eq!(outcome, RunOutcome::Completed);
    }
}

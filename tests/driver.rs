mod tests {
    use core::cell::Cell;

    use algo_light_composer::{
        AnimationDriver, Clock, Duration, FlashPalette, FrameBuffer, Hooks, HuePalette, Instant,
        ItemArray, LedStrip, OutputDriver, Pacing, Rgb, SatPalette,
        algorithm::sort::insertion_sort,
        color::BLACK,
        driver::{MAX_FRAME_DROP, NEGATIVE_LITERAL},
        item::{Item, Value},
    };

    struct NullOutput;

    impl OutputDriver for NullOutput {
        fn write(&mut self, _colors: &[Rgb]) {}
    }

    type Strip = FrameBuffer<NullOutput, 64>;

    fn strip(len: usize) -> Strip {
        FrameBuffer::new(NullOutput, len).with_intensity(255)
    }

    /// Virtual time that only moves when someone sleeps
    #[derive(Default)]
    struct ManualClock {
        micros: Cell<u64>,
        delays: Cell<usize>,
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            Instant::from_micros(self.micros.get())
        }

        fn delay(&self, duration: Duration) {
            self.micros.set(self.micros.get() + duration.as_micros());
            self.delays.set(self.delays.get() + 1);
        }
    }

    /// Always asks to stop
    struct Stop;

    impl Hooks for Stop {
        fn is_interrupted(&self) -> bool {
            true
        }
    }

    /// Counts polls from pacing points
    #[derive(Default)]
    struct PollCounter {
        polls: usize,
        comparisons: usize,
    }

    impl Hooks for PollCounter {
        fn on_comparison_count(&mut self, count: usize) {
            self.comparisons = count;
        }

        fn on_delay(&mut self, _strip: &mut dyn LedStrip) {
            self.polls += 1;
        }
    }

    #[test]
    fn test_pacing_from_delay_time() {
        assert_eq!(
            Pacing::from_delay_time(-44),
            Pacing {
                frame_drop: 44,
                delay: Duration::from_ticks(0)
            }
        );
        assert_eq!(
            Pacing::from_delay_time(16_000),
            Pacing::per_event(Duration::from_micros(16_000))
        );
        assert_eq!(Pacing::from_delay_time(0).frame_drop, 0);
        assert_eq!(Pacing::batched(1000).frame_drop, MAX_FRAME_DROP);
    }

    #[test]
    fn test_per_event_pacing_commits_every_access() {
        let clock = ManualClock::default();
        let mut strip = strip(8);
        let mut hooks = PollCounter::default();
        {
            let driver = AnimationDriver::new(
                &mut strip,
                HuePalette::default(),
                &clock,
                &mut hooks,
                Pacing::per_event(Duration::from_millis(1)),
            );
            let mut a = ItemArray::new(8, driver, 0).unwrap();
            for i in 0..8 {
                a.set(i, Item::new(i as Value));
            }
        }
        assert_eq!(strip.shows(), 8);
        assert_eq!(clock.now(), Instant::from_millis(8));
        assert_eq!(hooks.polls, 8);
    }

    #[test]
    fn test_batched_pacing_commits_once_per_batch() {
        let clock = ManualClock::default();
        let mut strip = strip(8);
        {
            let driver = AnimationDriver::new(
                &mut strip,
                HuePalette::default(),
                &clock,
                (),
                Pacing::batched(8),
            );
            let mut a = ItemArray::new(8, driver, 0).unwrap();
            for i in 0..7 {
                a.set(i % 8, Item::new(1));
            }
            assert_eq!(a.observer().strip().shows(), 0);
            a.set(7, Item::new(1));
            assert_eq!(a.observer().strip().shows(), 1);

            for i in 0..12 {
                a.set(i % 8, Item::new(2));
            }
            assert_eq!(a.observer().strip().shows(), 2);

            let (cells, driver) = a.parts_mut();
            driver.pflush(cells);
        }
        assert_eq!(strip.shows(), 3);
        // batched pacing never sleeps for real
        assert_eq!(clock.now(), Instant::from_micros(0));
    }

    #[test]
    fn test_silent_access_draws_low_without_commit() {
        let clock = ManualClock::default();
        let mut strip = strip(4);
        let palette = HuePalette::default();
        {
            let driver = AnimationDriver::new(
                &mut strip,
                palette,
                &clock,
                (),
                Pacing::per_event(Duration::from_millis(5)),
            );
            let mut a = ItemArray::new(4, driver, 0).unwrap();
            a.fill_sorted();
        }
        assert_eq!(strip.shows(), 0);
        assert_eq!(clock.delays.get(), 0);
        for i in 0..4 {
            assert_eq!(strip.pixels()[i], palette.low(i, i as Value, 4, 255));
        }
    }

    fn settled_pixels(pacing: Pacing, seed: u64) -> Vec<Rgb> {
        let clock = ManualClock::default();
        let mut strip = strip(40);
        let cells: Vec<Item> = {
            let driver =
                AnimationDriver::new(&mut strip, HuePalette::default(), &clock, (), pacing);
            let mut a = ItemArray::new(40, driver, seed).unwrap();
            a.randomize();
            insertion_sort(&mut a).unwrap();
            let (cells, driver) = a.parts_mut();
            driver.pflush(cells);
            cells.to_vec()
        };

        let palette = HuePalette::default();
        for (i, item) in cells.iter().enumerate() {
            assert_eq!(strip.pixels()[i], palette.low(i, item.value(), 40, 255));
        }
        strip.pixels().to_vec()
    }

    #[test]
    fn test_frame_drop_does_not_change_the_final_frame() {
        let reference = settled_pixels(Pacing::per_event(Duration::from_micros(10)), 3);
        for frame_drop in [1, 2, 7, 40, MAX_FRAME_DROP] {
            assert_eq!(settled_pixels(Pacing::batched(frame_drop), 3), reference);
        }
    }

    #[test]
    fn test_pflush_forgets_pending_flashes() {
        let red = Rgb { r: 255, g: 0, b: 0 };
        let clock = ManualClock::default();
        let mut strip = strip(4);
        {
            let driver = AnimationDriver::new(
                &mut strip,
                HuePalette::default(),
                &clock,
                (),
                Pacing::batched(16),
            );
            let mut a = ItemArray::new(4, driver, 0).unwrap();
            a.set(0, Item::new(3));
            let (cells, driver) = a.parts_mut();
            driver.pflush(cells);

            // a second flush must not re-render the already settled slot
            a.observer_mut().strip_mut().set_pixel(0, red);
            let (cells, driver) = a.parts_mut();
            driver.pflush(cells);
        }
        assert_eq!(strip.pixels()[0], red);
        assert_eq!(strip.shows(), 2);
    }

    #[test]
    fn test_interrupted_driver_draws_nothing() {
        let clock = ManualClock::default();
        let mut strip = strip(8);
        {
            let driver = AnimationDriver::new(
                &mut strip,
                HuePalette::default(),
                &clock,
                Stop,
                Pacing::per_event(Duration::from_millis(1)),
            );
            let mut a = ItemArray::new(8, driver, 0).unwrap();
            for i in 0..8 {
                a.set(i, Item::new(1));
            }
            a.pause(Duration::from_millis(100));
            assert!(a.checkpoint().is_err());
        }
        assert_eq!(strip.shows(), 0);
        assert_eq!(clock.delays.get(), 0);
        assert!(strip.pixels().iter().all(|&pixel| pixel == BLACK));
    }

    #[test]
    fn test_comparisons_reach_hooks() {
        let clock = ManualClock::default();
        let mut strip = strip(16);
        let mut hooks = PollCounter::default();
        {
            let driver = AnimationDriver::new(
                &mut strip,
                HuePalette::default(),
                &clock,
                &mut hooks,
                Pacing::batched(4),
            );
            let mut a = ItemArray::new(16, driver, 0).unwrap();
            a.fill_reversed();
            insertion_sort(&mut a).unwrap();
        }
        assert_eq!(hooks.comparisons, 16 * 15 / 2);
    }

    #[test]
    fn test_hue_palette() {
        let palette = HuePalette::default();
        assert_eq!(palette.low(0, Item::BLACK.value(), 10, 255), BLACK);
        assert_eq!(
            palette.high(0, Item::BLACK.value(), 10, 255),
            Rgb {
                r: 255,
                g: 255,
                b: 255
            }
        );
        assert_eq!(palette.low(3, 5, 10, 0), BLACK);
    }

    #[test]
    fn test_sat_palette() {
        let palette = SatPalette::new(4);
        // variables: positive literal on, negative off
        assert_ne!(palette.low(0, 1, 10, 255), BLACK);
        assert_eq!(palette.low(1, NEGATIVE_LITERAL | 2, 10, 255), BLACK);
        // clause counters: unsatisfied is red, satisfied is green
        assert_eq!(palette.low(5, 0, 10, 255), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(palette.low(6, 2, 10, 255), Rgb { r: 0, g: 32, b: 0 });
        // cells outside the formula stay dark
        assert_eq!(palette.low(9, Item::BLACK.value(), 10, 255), BLACK);
    }
}

mod tests {
    use core::cell::Cell;

    use algo_light_composer::{
        Animation, Clock, Duration, FrameBuffer, Hooks, Instant, LedStrip, OutputDriver, Rgb,
        RunOutcome, StepResult, Track, run_animation, run_animations,
    };

    struct NullOutput {
        busy: bool,
    }

    impl OutputDriver for NullOutput {
        fn write(&mut self, _colors: &[Rgb]) {}

        fn busy(&self) -> bool {
            self.busy
        }
    }

    type Strip = FrameBuffer<NullOutput, 8>;

    fn strip() -> Strip {
        FrameBuffer::new(NullOutput { busy: false }, 8)
    }

    #[derive(Default)]
    struct ManualClock {
        micros: Cell<u64>,
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            Instant::from_micros(self.micros.get())
        }

        fn delay(&self, duration: Duration) {
            self.micros.set(self.micros.get() + duration.as_micros());
        }
    }

    /// Steps every `period` and ends after `steps` frames
    struct Ticker {
        period: Duration,
        steps: Option<u32>,
        seen: Vec<u32>,
    }

    impl Ticker {
        fn new(period_ms: u64, steps: Option<u32>) -> Self {
            Self {
                period: Duration::from_millis(period_ms),
                steps,
                seen: Vec::new(),
            }
        }
    }

    impl Animation for Ticker {
        fn step(&mut self, strip: &mut dyn LedStrip, step: u32) -> StepResult {
            self.seen.push(step);
            if self.steps.is_some_and(|steps| step >= steps) {
                return StepResult::End;
            }
            strip.set_pixel(0, Rgb { r: 1, g: 0, b: 0 });
            StepResult::Next(self.period)
        }
    }

    /// Interrupts after a number of polls
    struct StopAfter {
        polls: usize,
        limit: usize,
    }

    impl Hooks for StopAfter {
        fn on_delay(&mut self, _strip: &mut dyn LedStrip) {
            self.polls += 1;
        }

        fn is_interrupted(&self) -> bool {
            self.polls >= self.limit
        }
    }

    #[test]
    fn test_single_animation_runs_to_end() {
        let clock = ManualClock::default();
        let mut strip = strip();
        let mut ticker = Ticker::new(10, Some(5));

        let outcome = run_animation(
            &mut ticker,
            &mut strip,
            &clock,
            &mut (),
            Duration::from_secs(10),
        );

        assert_eq!(outcome, RunOutcome::Ended);
        assert_eq!(ticker.seen, vec![0, 1, 2, 3, 4, 5]);
        // the ending step does not commit a frame
        assert_eq!(strip.shows(), 5);
        assert_eq!(clock.now(), Instant::from_millis(50));
    }

    #[test]
    fn test_time_limit() {
        let clock = ManualClock::default();
        let mut strip = strip();
        let mut ticker = Ticker::new(10, None);

        let outcome = run_animation(
            &mut ticker,
            &mut strip,
            &clock,
            &mut (),
            Duration::from_millis(95),
        );

        assert_eq!(outcome, RunOutcome::TimeLimit);
        assert_eq!(ticker.seen.len(), 10);
        assert_eq!(clock.now(), Instant::from_millis(95));
    }

    #[test]
    fn test_interruption() {
        let clock = ManualClock::default();
        let mut strip = strip();
        let mut ticker = Ticker::new(10, None);
        let mut hooks = StopAfter { polls: 0, limit: 3 };

        let outcome = run_animation(
            &mut ticker,
            &mut strip,
            &clock,
            &mut hooks,
            Duration::from_secs(10),
        );

        assert_eq!(outcome, RunOutcome::Interrupted);
        assert_eq!(ticker.seen.len(), 3);
    }

    #[test]
    fn test_busy_strip_is_not_committed() {
        let clock = ManualClock::default();
        let mut strip = FrameBuffer::<NullOutput, 8>::new(NullOutput { busy: true }, 8);
        let mut ticker = Ticker::new(10, Some(3));

        let outcome = run_animation(
            &mut ticker,
            &mut strip,
            &clock,
            &mut (),
            Duration::from_secs(1),
        );

        assert_eq!(outcome, RunOutcome::Ended);
        assert_eq!(strip.shows(), 0);
        assert_eq!(strip.pixel(0), Rgb { r: 1, g: 0, b: 0 });
    }

    #[test]
    fn test_tracks_interleave_by_due_time() {
        let clock = ManualClock::default();
        let mut fast_strip = strip();
        let mut slow_strip = strip();
        let mut fast = Ticker::new(10, Some(4));
        let mut slow = Ticker::new(25, Some(4));

        let outcome = {
            let mut tracks = [
                Track::new(&mut fast, &mut fast_strip),
                Track::new(&mut slow, &mut slow_strip),
            ];
            let outcome = run_animations(&mut tracks, &clock, &mut (), Duration::from_secs(10));
            assert!(tracks.iter().all(Track::is_ended));
            assert_eq!(tracks[0].steps(), 5);
            assert_eq!(tracks[1].steps(), 5);
            outcome
        };

        assert_eq!(outcome, RunOutcome::Ended);
        // the run lasts as long as the slowest track
        assert_eq!(clock.now(), Instant::from_millis(100));
        assert_eq!(fast_strip.shows(), 4);
        assert_eq!(slow_strip.shows(), 4);
    }

    #[test]
    fn test_run_ends_only_when_every_track_ended() {
        let clock = ManualClock::default();
        let mut first_strip = strip();
        let mut second_strip = strip();
        let mut short = Ticker::new(10, Some(1));
        let mut endless = Ticker::new(10, None);

        let outcome = {
            let mut tracks = [
                Track::new(&mut short, &mut first_strip),
                Track::new(&mut endless, &mut second_strip),
            ];
            run_animations(&mut tracks, &clock, &mut (), Duration::from_millis(200))
        };

        assert_eq!(outcome, RunOutcome::TimeLimit);
        assert_eq!(short.seen, vec![0, 1]);
        assert_eq!(endless.seen.len(), 20);
    }
}

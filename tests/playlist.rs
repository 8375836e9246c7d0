mod tests {
    use core::cell::Cell;

    use algo_light_composer::{
        AlgorithmId, AlgorithmPlaylist, Clock, Duration, FluxId, FluxPlaylist, FrameBuffer,
        Hooks, Instant, OutputDriver, Rgb, RunOutcome,
        playlist::{FLUX_LINEUP, flux_lineup},
    };

    struct NullOutput;

    impl OutputDriver for NullOutput {
        fn write(&mut self, _colors: &[Rgb]) {}
    }

    type Strip = FrameBuffer<NullOutput, 64>;

    fn strip(len: usize) -> Strip {
        FrameBuffer::new(NullOutput, len)
    }

    /// Sleeps advance time by at least a millisecond
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

    #[derive(Default)]
    struct Recorder {
        names: Vec<String>,
        interrupted: bool,
    }

    impl Hooks for Recorder {
        fn on_algorithm(&mut self, name: &str) {
            self.names.push(name.to_string());
        }

        fn is_interrupted(&self) -> bool {
            self.interrupted
        }
    }

    #[test]
    fn test_flux_lineup_covers_every_animation() {
        let ids: Vec<FluxId> = (0..FLUX_LINEUP).map(|i| flux_lineup(i, 0).id()).collect();
        for id in FluxId::ALL {
            assert!(ids.contains(&id), "{} missing", id.as_str());
        }
        assert_eq!(flux_lineup(FLUX_LINEUP, 0).id(), flux_lineup(0, 0).id());
    }

    #[test]
    fn test_flux_playlist_is_seeded() {
        let mut a = FluxPlaylist::new(21);
        let mut b = FluxPlaylist::new(21);
        for _ in 0..20 {
            assert_eq!(a.next_slot().id(), b.next_slot().id());
        }
    }

    #[test]
    fn test_flux_playlist_gives_each_animation_its_slot() {
        let clock = TickingClock::default();
        let mut strip = strip(30);
        let mut playlist = FluxPlaylist::new(5).with_time_limit(Duration::from_millis(200));

        let outcome = playlist.play(&mut strip, &clock, &mut (), 3);
        assert_eq!(outcome, RunOutcome::Completed);
        assert!(clock.now() >= Instant::from_millis(600));
        assert!(strip.shows() > 0);
    }

    #[test]
    fn test_flux_playlist_stops_when_interrupted() {
        let clock = TickingClock::default();
        let mut strip = strip(30);
        let mut hooks = Recorder {
            interrupted: true,
            ..Recorder::default()
        };
        let mut playlist = FluxPlaylist::new(5);

        let outcome = playlist.play(&mut strip, &clock, &mut hooks, 10);
        assert_eq!(outcome, RunOutcome::Interrupted);
        assert!(clock.now() < Instant::from_secs(20));
    }

    #[test]
    fn test_algorithm_playlist_walks_the_catalogue() {
        let clock = TickingClock::default();
        let mut strip = strip(24);
        let mut hooks = Recorder::default();
        let mut playlist = AlgorithmPlaylist::new(3);
        assert_eq!(playlist.upcoming(), AlgorithmId::ALL[0]);

        let outcome = playlist.play(&mut strip, &clock, &mut hooks, 3).unwrap();
        assert_eq!(outcome, RunOutcome::Completed);

        let expected: Vec<String> = AlgorithmId::ALL[..3]
            .iter()
            .map(|id| id.display_name().to_string())
            .collect();
        assert_eq!(hooks.names, expected);
        assert_eq!(playlist.upcoming(), AlgorithmId::ALL[3]);
    }

    #[test]
    fn test_algorithm_playlist_wraps_around() {
        let clock = TickingClock::default();
        let mut strip = strip(16);
        let mut playlist = AlgorithmPlaylist::new(0).with_start(AlgorithmId::LawaSat);

        let outcome = playlist.play_next(&mut strip, &clock, ()).unwrap();
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(playlist.upcoming(), AlgorithmId::LawaSat.next());
    }

    #[test]
    fn test_algorithm_playlist_stops_when_interrupted() {
        let clock = TickingClock::default();
        let mut strip = strip(24);
        let mut hooks = Recorder {
            interrupted: true,
            ..Recorder::default()
        };
        let mut playlist = AlgorithmPlaylist::new(3).with_start(AlgorithmId::Insertion);

        let outcome = playlist.play(&mut strip, &clock, &mut hooks, 5).unwrap();
        assert_eq!(outcome, RunOutcome::Interrupted);
        assert_eq!(hooks.names.len(), 1);
        assert_eq!(playlist.upcoming(), AlgorithmId::Insertion.next());
    }
}

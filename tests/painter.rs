mod tests {
    use embassy_time::{Duration, Instant};
    use pattern_composer::{
        FrameScheduler, OutputDriver, Painter, PainterConfig, PatternChannel, PatternCommand,
        color::{Rgb, blend_colors},
        curve::Curve,
        pattern::{Cycle, PatternSlot, StaticColor},
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    fn solid(color: Rgb) -> PatternSlot {
        StaticColor::new(color).into()
    }

    fn config(transition_ms: u64) -> PainterConfig {
        PainterConfig {
            num_leds: 2,
            transition: Duration::from_millis(transition_ms),
            curve: Curve::Linear,
        }
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_default_config() {
        let config = PainterConfig::default();
        assert_eq!(config.num_leds, 100);
        assert_eq!(config.transition, Duration::from_millis(500));
        assert_eq!(config.curve, Curve::EaseOut);
    }

    #[test]
    fn test_renders_black_without_pattern() {
        let channel = PatternChannel::<4>::new();
        let mut painter = Painter::new(channel.receiver(), &config(100));
        assert_eq!(painter.render(at(0)), &[BLACK; 2]);
        assert!(painter.pattern().is_none());
    }

    #[test]
    fn test_first_pattern_is_a_cut() {
        let channel = PatternChannel::<4>::new();
        let mut painter = Painter::new(channel.receiver(), &config(1000));
        painter.set_pattern(solid(RED), at(10));
        assert!(!painter.is_transitioning());
        assert_eq!(painter.render(at(10)), &[RED; 2]);
    }

    #[test]
    fn test_set_pattern_cross_fades() {
        let channel = PatternChannel::<4>::new();
        let mut painter = Painter::new(channel.receiver(), &config(1000));
        painter.cut_to(solid(RED), at(0));
        painter.set_pattern(solid(BLUE), at(500));
        assert!(painter.is_transitioning());

        assert_eq!(painter.render(at(500)), &[RED; 2]);
        let half = blend_colors(RED, BLUE, Curve::Linear.scale8(32767));
        assert_eq!(painter.render(at(1000)), &[half; 2]);
        assert_eq!(painter.render(at(1500)), &[BLUE; 2]);
        assert!(!painter.is_transitioning());
    }

    #[test]
    fn test_new_pattern_clock_survives_transition() {
        let channel = PatternChannel::<4>::new();
        let mut painter = Painter::new(channel.receiver(), &config(100));
        painter.cut_to(solid(BLACK), at(0));
        painter.set_pattern(Cycle::new(vec![solid(RED), solid(GREEN)], 1000).into(), at(2000));

        assert_eq!(painter.render(at(2100)), &[RED; 2]);
        assert!(!painter.is_transitioning());
        assert_eq!(painter.render(at(3100)), &[GREEN; 2]);
    }

    #[test]
    fn test_commands_are_applied_on_render() {
        let channel = PatternChannel::<4>::new();
        let sender = channel.sender();
        let mut painter = Painter::new(channel.receiver(), &config(100));

        sender.cut_to(solid(GREEN)).unwrap();
        assert_eq!(painter.render(at(0)), &[GREEN; 2]);

        sender.fade_to(solid(BLUE)).unwrap();
        painter.render(at(50));
        assert!(painter.is_transitioning());
        assert_eq!(painter.render(at(150)), &[BLUE; 2]);

        sender.try_send(PatternCommand::Clear).unwrap();
        assert_eq!(painter.render(at(200)), &[BLUE; 2]);
        assert!(painter.pattern().is_none());
    }

    #[test]
    fn test_full_channel_returns_command() {
        let channel = PatternChannel::<1>::new();
        let sender = channel.sender();
        sender.cut_to(solid(RED)).unwrap();
        let rejected = sender.cut_to(solid(BLUE)).unwrap_err();
        assert!(matches!(rejected.0, PatternCommand::Cut(_)));
    }

    #[derive(Default)]
    struct RecordingDriver {
        frames: Vec<Vec<Rgb>>,
    }

    impl OutputDriver for RecordingDriver {
        fn write(&mut self, colors: &[Rgb]) {
            self.frames.push(colors.to_vec());
        }
    }

    #[test]
    fn test_scheduler_writes_and_paces() {
        let channel = PatternChannel::<4>::new();
        channel.sender().cut_to(solid(RED)).unwrap();
        let painter = Painter::new(channel.receiver(), &config(100));
        let mut scheduler = FrameScheduler::with_frame_duration(
            painter,
            RecordingDriver::default(),
            Duration::from_millis(20),
        );

        let first = scheduler.tick(at(0));
        assert_eq!(first.next_deadline, at(20));
        assert_eq!(first.sleep_duration, Duration::from_millis(20));

        let second = scheduler.tick(at(25));
        assert_eq!(second.next_deadline, at(40));
        assert_eq!(second.sleep_duration, Duration::from_millis(15));

        // Stall of more than two frames
        let third = scheduler.tick(at(200));
        assert_eq!(third.next_deadline, at(220));

        let driver = scheduler.into_output();
        assert_eq!(driver.frames.len(), 3);
        assert!(driver.frames.iter().all(|frame| frame == &[RED; 2]));
    }
}

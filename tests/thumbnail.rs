mod tests {
    use std::{io::Cursor, sync::Arc, thread};

    use embassy_time::Duration;
    use image::{AnimationDecoder, codecs::gif::GifDecoder};
    use pattern_composer::{
        ComposerError, PatternRegistry, ThumbnailCache, ThumbnailConfig,
        thumbnail::render_gif,
    };

    const ROTATING: &[u8] =
        br##"{"_type":"Rotate","child":"Lff0000000000000000","moves_per_sec":10.0}"##;

    fn init_logging() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn small_config() -> ThumbnailConfig {
        ThumbnailConfig {
            num_leds: 3,
            hz: 10,
            duration: Duration::from_secs(1),
        }
    }

    fn cache() -> ThumbnailCache {
        ThumbnailCache::new(Arc::new(PatternRegistry::with_builtin()), small_config())
    }

    fn decode_frames(gif: &[u8]) -> Vec<image::Frame> {
        GifDecoder::new(Cursor::new(gif))
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ThumbnailConfig::default();
        assert_eq!(config.num_leds, 100);
        assert_eq!(config.hz, 10);
        assert_eq!(config.duration, Duration::from_secs(10));
        assert_eq!(config.frame_count(), 100);
        assert_eq!(config.frame_delay(), Duration::from_millis(100));
        assert_eq!(
            serde_json::to_string(&config).unwrap(),
            r#"{"num_leds":100,"hz":10,"duration_ms":10000}"#
        );
        let partial: ThumbnailConfig = serde_json::from_str(r#"{"num_leds":30}"#).unwrap();
        assert_eq!(partial.num_leds, 30);
        assert_eq!(partial.hz, 10);
    }

    #[test]
    fn test_gif_frames_follow_pattern() {
        init_logging();
        let thumbnail = cache().get_or_render(ROTATING).unwrap();
        assert_eq!(thumbnail.config, small_config());

        let frames = decode_frames(&thumbnail.gif);
        assert_eq!(frames.len(), 10);
        for (index, frame) in frames.iter().enumerate() {
            let image = frame.buffer();
            assert_eq!(image.dimensions(), (3, 1));
            assert_eq!(frame.delay().numer_denom_ms(), (100, 1));
            // One move per frame at 10 moves per second
            let red = index % 3;
            for x in 0..3 {
                let expected = if x == red as u32 {
                    [255, 0, 0, 255]
                } else {
                    [0, 0, 0, 255]
                };
                assert_eq!(image.get_pixel(x, 0).0, expected, "frame {index}, pixel {x}");
            }
        }
    }

    #[test]
    fn test_hit_returns_cached_thumbnail() {
        let cache = cache();
        let first = cache.get_or_render(ROTATING).unwrap();
        let second = cache.get_or_render(ROTATING).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.render_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_are_exact_bytes() {
        let cache = cache();
        cache.get_or_render(br##"{"_type":"Rainbow"}"##).unwrap();
        cache.get_or_render(br##"{ "_type": "Rainbow" }"##).unwrap();
        assert_eq!(cache.render_count(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_concurrent_requests_render_once() {
        init_logging();
        let cache = cache();
        let results: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| cache.get_or_render(ROTATING).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(cache.render_count(), 1);
        for thumbnail in &results[1..] {
            assert!(Arc::ptr_eq(&results[0], thumbnail));
        }
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = cache();
        let err = cache.get_or_render(br##"{"_type":"Sparkle"}"##).unwrap_err();
        assert!(matches!(err, ComposerError::UnknownPattern(_)));
        assert!(cache.get_or_render(b"{").is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.render_count(), 0);

        cache.get_or_render(ROTATING).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_oversized_buffers_are_rejected() {
        let cache = cache();
        let requests: [&[u8]; 3] = [
            br##"{"_type":"Scale","child":"#ffffff","length":1000000000000000}"##,
            br##"{"_type":"Scale","child":"#ffffff","ratio":1e30}"##,
            br##"{"_type":"Crop","child":"#ffffff","start":1,"length":9}"##,
        ];
        for bytes in requests {
            let err = cache.get_or_render(bytes).unwrap_err();
            assert!(matches!(err, ComposerError::Validation(_)), "{err}");
        }
        assert!(cache.is_empty());
        assert_eq!(cache.render_count(), 0);
    }

    #[test]
    fn test_zero_rate_is_rejected() {
        let mut pattern = PatternRegistry::with_builtin()
            .decode(ROTATING)
            .unwrap();
        let config = ThumbnailConfig {
            hz: 0,
            ..small_config()
        };
        assert!(matches!(
            render_gif(&mut pattern, &config),
            Err(ComposerError::Validation(_))
        ));
    }
}

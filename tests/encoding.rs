mod tests {
    use embassy_time::Instant;
    use pattern_composer::{
        ComposerError, PatternRegistry,
        color::Rgb,
        curve::Curve,
        encoding::{Fields, encode, encode_string, from_base64_url, to_base64_url},
        pattern::{Cycle, PatternKind, PatternSlot, Rotate, StaticColor, child},
    };

    const EVERY_KIND: &str = concat!(
        r##"{"_type":"Mixer","patterns":["##,
        r##"{"_type":"Gradient","left":"#ff0000","right":"L00ff000000ff","curve":"ease-in"},"##,
        r##"{"_type":"Transition","before":{"_type":"Rainbow"},"##,
        r##""after":{"_type":"Repeated","base":"Lff0000000000"},"##,
        r##""offset_ms":100,"duration_ms":250,"curve":"linear"},"##,
        r##"{"_type":"Cycle","frames":["#010203","##,
        r##"{"_type":"Chronometer","child":"L000000ff000000ff000000ff"}],"##,
        r##""frame_duration_ms":40},"##,
        r##"{"_type":"Loop","patterns":["##,
        r##"{"_type":"Rotate","child":"#00ff00","moves_per_sec":-2.5},"##,
        r##"{"_type":"PingPong","child":"#0000ff","moves_per_sec":30.0}],"##,
        r##""show_ms":1000,"transition_ms":500,"curve":"step-middle"},"##,
        r##"{"_type":"Crop","child":{"_type":"Scale","child":"#ffffff","##,
        r##""interpolation":"nearest","length":3,"ratio":0.0},"start":2,"length":4}"##,
        r##"],"weights":[0.25,0.5,1.0,1.5,0.75]}"##,
    );

    fn registry() -> PatternRegistry {
        PatternRegistry::with_builtin()
    }

    #[test]
    fn test_color_uses_shorthand() {
        let pattern: PatternSlot = StaticColor::new(Rgb::new(0x12, 0xab, 0xef)).into();
        assert_eq!(encode_string(&pattern).unwrap(), r##""#12abef""##);
        assert_eq!(encode(&pattern).unwrap(), br##""#12abef""##.to_vec());
    }

    #[test]
    fn test_tagged_object_form() {
        let pattern: PatternSlot = Rotate::new(child(StaticColor::new(Rgb::new(0, 0, 255))), 6.0).into();
        assert_eq!(
            encode_string(&pattern).unwrap(),
            r##"{"_type":"Rotate","child":"#0000ff","moves_per_sec":6.0}"##
        );
    }

    #[test]
    fn test_absent_child_is_omitted() {
        let pattern: PatternSlot = Rotate::new(None, 1.0).into();
        assert_eq!(
            encode_string(&pattern).unwrap(),
            r##"{"_type":"Rotate","moves_per_sec":1.0}"##
        );
    }

    #[test]
    fn test_every_kind_round_trips_canonically() {
        let registry = registry();
        let pattern = registry.decode_str(EVERY_KIND).unwrap();
        assert_eq!(encode_string(&pattern).unwrap(), EVERY_KIND);

        let again = registry.decode(&registry.encode(&pattern).unwrap()).unwrap();
        assert_eq!(encode_string(&again).unwrap(), EVERY_KIND);
    }

    #[test]
    fn test_round_trip_renders_identically() {
        let registry = registry();
        let mut original = registry.decode_str(EVERY_KIND).unwrap();
        let mut decoded = registry.decode(&encode(&original).unwrap()).unwrap();
        for now_ms in [0, 120, 600, 1700] {
            let now = Instant::from_millis(now_ms);
            let mut expected = vec![Rgb::default(); 8];
            let mut actual = vec![Rgb::default(); 8];
            original.render(now, &mut expected);
            decoded.render(now, &mut actual);
            assert_eq!(actual, expected, "at {now_ms} ms");
        }
    }

    #[test]
    fn test_decode_normalizes_field_order() {
        let pattern = registry()
            .decode_str(r##"{ "moves_per_sec": 6, "child": {"_type": "Rainbow"}, "_type": "PingPong" }"##)
            .unwrap();
        assert_eq!(pattern.kind(), PatternKind::PingPong);
        assert_eq!(
            encode_string(&pattern).unwrap(),
            r##"{"_type":"PingPong","child":{"_type":"Rainbow"},"moves_per_sec":6.0}"##
        );
    }

    #[test]
    fn test_tagged_color_and_frame_decode_to_shorthand() {
        let registry = registry();
        let color = registry
            .decode_str(r##"{"_type":"Color","color":"#FF0000"}"##)
            .unwrap();
        assert_eq!(encode_string(&color).unwrap(), r##""#ff0000""##);

        let frame = registry
            .decode_str(r##"{"_type":"Frame","frame":"L0000ff"}"##)
            .unwrap();
        assert_eq!(frame.kind(), PatternKind::Frame);
        assert_eq!(encode_string(&frame).unwrap(), r##""L0000ff""##);
    }

    #[test]
    fn test_null_and_missing_fields_use_defaults() {
        let pattern = registry()
            .decode_str(r##"{"_type":"Loop","patterns":null}"##)
            .unwrap();
        assert_eq!(
            encode_string(&pattern).unwrap(),
            r##"{"_type":"Loop","patterns":[],"show_ms":0,"transition_ms":0,"curve":"ease-out"}"##
        );

        let rotate = registry()
            .decode_str(r##"{"_type":"Rotate","child":null,"moves_per_sec":2.0}"##)
            .unwrap();
        assert_eq!(
            encode_string(&rotate).unwrap(),
            r##"{"_type":"Rotate","moves_per_sec":2.0}"##
        );
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let pattern = registry()
            .decode_str(r##"{"_type":"Rainbow","speed":3}"##)
            .unwrap();
        assert_eq!(encode_string(&pattern).unwrap(), r##"{"_type":"Rainbow"}"##);
    }

    #[test]
    fn test_unknown_tag_is_an_error() {
        let err = registry()
            .decode_str(r##"{"_type":"Sparkle"}"##)
            .unwrap_err();
        assert!(matches!(err, ComposerError::UnknownPattern(tag) if tag == "Sparkle"));
    }

    #[test]
    fn test_nested_unknown_tag_is_an_error() {
        let err = registry()
            .decode_str(r##"{"_type":"Rotate","child":{"_type":"Sparkle"}}"##)
            .unwrap_err();
        assert!(matches!(err, ComposerError::UnknownPattern(_)));
    }

    #[test]
    fn test_malformed_input() {
        let registry = registry();
        assert!(matches!(
            registry.decode(b"{not json"),
            Err(ComposerError::Json(_))
        ));
        assert!(matches!(
            registry.decode_str(r##"{"moves_per_sec":1}"##),
            Err(ComposerError::Decode(_))
        ));
        assert!(matches!(
            registry.decode_str(r##"{"_type":7}"##),
            Err(ComposerError::Decode(_))
        ));
        assert!(matches!(
            registry.decode_str(r##""#12345""##),
            Err(ComposerError::Decode(_))
        ));
        assert!(matches!(
            registry.decode_str(r##""L12345""##),
            Err(ComposerError::Decode(_))
        ));
        assert!(matches!(
            registry.decode_str(r##""rainbow""##),
            Err(ComposerError::Decode(_))
        ));
        assert!(matches!(registry.decode_str("42"), Err(ComposerError::Decode(_))));
    }

    #[test]
    fn test_bad_field_reports_kind_and_key() {
        let err = registry()
            .decode_str(r##"{"_type":"Cycle","frame_duration_ms":"soon"}"##)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Cycle.frame_duration_ms"), "{message}");

        let err = registry()
            .decode_str(r##"{"_type":"Crop","start":-1}"##)
            .unwrap_err();
        assert!(matches!(err, ComposerError::Decode(_)));
    }

    #[test]
    fn test_empty_registry_knows_no_tags() {
        let registry = PatternRegistry::new();
        assert!(!registry.contains("Rainbow"));
        assert!(matches!(
            registry.decode_str(r##"{"_type":"Rainbow"}"##),
            Err(ComposerError::UnknownPattern(_))
        ));
        assert!(PatternRegistry::with_builtin().contains("Rainbow"));
    }

    fn decode_blink(
        _: &PatternRegistry,
        fields: &mut Fields,
    ) -> pattern_composer::ComposerResult<PatternSlot> {
        let color = fields.color("color")?;
        let period_ms: u64 = fields.value("period_ms")?;
        Ok(Cycle::new(
            vec![
                StaticColor::new(color).into(),
                StaticColor::new(Rgb::default()).into(),
            ],
            period_ms / 2,
        )
        .into())
    }

    #[test]
    fn test_host_registered_tag() {
        let mut registry = registry();
        registry.register("Blink", decode_blink);
        let pattern = registry
            .decode_str(r##"{"_type":"Blink","color":"#00ff00","period_ms":1000}"##)
            .unwrap();
        assert_eq!(
            encode_string(&pattern).unwrap(),
            r##"{"_type":"Cycle","frames":["#00ff00","#000000"],"frame_duration_ms":500}"##
        );
    }

    #[test]
    fn test_base64_url_wrapping() {
        let bytes = br##"{"_type":"Rainbow"}"##;
        let wrapped = to_base64_url(bytes);
        assert!(!wrapped.contains('+') && !wrapped.contains('/'));
        assert_eq!(from_base64_url(&wrapped).unwrap(), bytes.to_vec());
        assert!(matches!(
            from_base64_url("not base64!"),
            Err(ComposerError::Base64(_))
        ));
    }

    #[test]
    fn test_curve_field_accepts_alias() {
        let pattern = registry()
            .decode_str(r##"{"_type":"Gradient","left":"#000000","right":"#ffffff","curve":"direct"}"##)
            .unwrap();
        let PatternSlot::Gradient(gradient) = pattern else {
            panic!("expected a gradient");
        };
        assert_eq!(gradient.curve, Curve::Linear);
    }
}

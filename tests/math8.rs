mod tests {
    use embassy_time::Duration;
    use pattern_composer::math8::{blend8, high_byte, progress16, saturate8};

    #[test]
    fn test_blend8() {
        assert_eq!(blend8(255, 128, 128), 191);
        assert_eq!(blend8(0, 128, 255), 128);
        assert_eq!(blend8(255, 0, 128), 127);
        assert_eq!(blend8(0, 255, 128), 128);
        assert_eq!(blend8(255, 128, 0), 255);
    }

    #[test]
    fn test_progress16() {
        assert_eq!(
            progress16(Duration::from_millis(0), Duration::from_millis(100)),
            0
        );
        assert_eq!(
            progress16(Duration::from_millis(50), Duration::from_millis(100)),
            32767
        );
        assert_eq!(
            progress16(Duration::from_millis(100), Duration::from_millis(100)),
            u16::MAX
        );
        assert_eq!(
            progress16(Duration::from_millis(150), Duration::from_millis(100)),
            u16::MAX
        );
        assert_eq!(
            progress16(Duration::from_millis(10), Duration::from_millis(0)),
            0
        );
    }

    #[test]
    fn test_high_byte() {
        assert_eq!(high_byte(0), 0);
        assert_eq!(high_byte(0x80FF), 0x80);
        assert_eq!(high_byte(u16::MAX), 255);
    }

    #[test]
    fn test_saturate8() {
        assert_eq!(saturate8(-3.0), 0);
        assert_eq!(saturate8(0.49), 0);
        assert_eq!(saturate8(0.5), 1);
        assert_eq!(saturate8(127.5), 128);
        assert_eq!(saturate8(254.6), 255);
        assert_eq!(saturate8(400.0), 255);
    }
}

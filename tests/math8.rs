mod tests {
    use algo_light_composer::math8::{dim8, qadd8};

    #[test]
    fn test_qadd8() {
        assert_eq!(qadd8(100, 100), 200);
        assert_eq!(qadd8(200, 100), 255);
        assert_eq!(qadd8(0, 0), 0);
    }

    #[test]
    fn test_dim8() {
        assert_eq!(dim8(255, 96), 96);
        assert_eq!(dim8(64, 255), 64);
        assert_eq!(dim8(255, 0), 0);
        assert_eq!(dim8(128, 128), 64);
        // channels computed above full scale saturate
        assert_eq!(dim8(510, 255), 255);
    }
}

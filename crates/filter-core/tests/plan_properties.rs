use inlay_filter_core::{escape_text, reconcile, target_dimensions, wrap_text, DurationStrategy};
use inlay_job_model::StreamInfo;
use proptest::prelude::*;

fn info(width: u32, height: u32) -> StreamInfo {
    StreamInfo {
        width,
        height,
        duration_secs: 10.0,
        fps: 30.0,
    }
}

proptest! {
    #[test]
    fn reconcile_always_covers_the_longer_input(
        base in 0.04f64..7200.0,
        overlay in 0.04f64..7200.0,
    ) {
        let outcome = reconcile(base, overlay);
        prop_assert_eq!(outcome.output_duration_secs, base.max(overlay));
        match outcome.strategy {
            DurationStrategy::FreezeOverlay => {
                prop_assert!(base > overlay);
                prop_assert!((outcome.pad_secs - (base - overlay)).abs() < 1e-9);
            }
            DurationStrategy::LoopBase => {
                prop_assert!(base <= overlay);
                prop_assert_eq!(outcome.pad_secs, 0.0);
            }
        }
    }

    #[test]
    fn scaled_overlay_keeps_its_aspect_within_rounding(
        base_height in 200u32..4000,
        overlay_width in 100u32..4000,
        overlay_height in 100u32..4000,
        size_ratio in 0.1f64..1.0,
    ) {
        let base = info(1920, base_height);
        let overlay = info(overlay_width, overlay_height);
        let (w, h) = target_dimensions(&base, &overlay, size_ratio);

        prop_assert!(h >= 1);
        prop_assert!(h <= base_height);
        let ideal = h as f64 * overlay_width as f64 / overlay_height as f64;
        prop_assert!((w as f64 - ideal).abs() <= 0.5);
    }

    #[test]
    fn wrapped_lines_stay_within_the_character_limit(
        text in "[a-z ]{0,200}",
        max_width_px in 50u32..2000,
        font_size in 8u32..96,
    ) {
        let wrapped = wrap_text(&text, max_width_px, font_size);
        let avg_char_width = font_size as f64 * 0.455;
        let max_chars = ((max_width_px as f64 / avg_char_width) as usize).max(10);
        for line in wrapped.split('\n') {
            let within = line.chars().count() <= max_chars;
            let lone_overlong_word = !line.contains(' ');
            prop_assert!(within || lone_overlong_word, "line too long: {:?}", line);
        }
    }

    #[test]
    fn wrapping_never_loses_a_word(
        text in "[a-z ]{0,200}",
        max_width_px in 50u32..2000,
        font_size in 8u32..96,
    ) {
        let wrapped = wrap_text(&text, max_width_px, font_size);
        let original: Vec<&str> = text.split_whitespace().collect();
        let rewrapped: Vec<&str> = wrapped.split_whitespace().collect();
        prop_assert_eq!(original, rewrapped);
    }

    #[test]
    fn escaping_is_identity_on_clean_text(text in "[a-z0-9 ]{0,120}") {
        prop_assert_eq!(escape_text(&text), text);
    }

    #[test]
    fn escaping_never_touches_line_breaks(text in "[a-z:%' \\\\\n]{0,120}") {
        let escaped = escape_text(&text);
        prop_assert_eq!(escaped.split('\n').count(), text.split('\n').count());
        prop_assert!(escaped.len() >= text.len());
    }
}

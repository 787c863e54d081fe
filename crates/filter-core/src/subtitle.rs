//! Time-gated subtitle stages: wrapping, escaping, placement.
//!
//! Each segment becomes one `drawtext` stage gated to its time window,
//! chained in input order on top of the composited video. Overlapping
//! windows therefore render all active segments at once. Wrapping runs
//! before escaping so inserted line breaks are never escaped as text.

use inlay_job_model::{SubtitlePosition, SubtitleSegment, SubtitleStyle};

use crate::graph::{FilterGraph, StreamRef};

/// Pixel margin between text and the canvas edge.
const TEXT_MARGIN: u32 = 50;

/// Wrap text to a pixel width using an estimated average glyph width.
///
/// A zero width disables wrapping. Words are packed greedily; a single
/// word longer than the line limit stands alone on its own line,
/// untruncated. Lines are joined with a literal line break.
pub fn wrap_text(text: &str, max_width_px: u32, font_size: u32) -> String {
    if max_width_px == 0 {
        return text.to_string();
    }

    // Average glyph width: font size scaled by two empirical shrink
    // factors (0.65 * 0.7). Changing this constant changes wrap points.
    let avg_char_width = font_size as f64 * 0.455;
    let max_chars = ((max_width_px as f64 / avg_char_width) as usize).max(10);

    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        let candidate = if current.is_empty() {
            word_chars
        } else {
            current_chars + 1 + word_chars
        };

        if candidate <= max_chars {
            if !current.is_empty() {
                current.push(' ');
                current_chars += 1;
            }
            current.push_str(word);
            current_chars += word_chars;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push_str(word);
            current_chars = word_chars;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// Escape engine-special characters independently per line.
///
/// Backslash is replaced first; line breaks themselves are never escaped.
/// Not idempotent: applying it to already-escaped text escapes the
/// escapes, so callers pass raw text exactly once.
pub fn escape_text(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            line.replace('\\', "\\\\")
                .replace('\'', "\\'")
                .replace(':', "\\:")
                .replace('%', "\\%")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// X/Y expressions for the text filter, in its `w`/`text_w` variable
/// vocabulary. `Custom` emits the configured literal coordinates.
pub fn subtitle_position_exprs(style: &SubtitleStyle) -> (String, String) {
    match style.position {
        SubtitlePosition::BottomCenter => (
            "(w-text_w)/2".to_string(),
            format!("h-text_h-{TEXT_MARGIN}"),
        ),
        SubtitlePosition::TopCenter => ("(w-text_w)/2".to_string(), TEXT_MARGIN.to_string()),
        SubtitlePosition::BottomLeft => (
            TEXT_MARGIN.to_string(),
            format!("h-text_h-{TEXT_MARGIN}"),
        ),
        SubtitlePosition::BottomRight => (
            format!("w-text_w-{TEXT_MARGIN}"),
            format!("h-text_h-{TEXT_MARGIN}"),
        ),
        SubtitlePosition::Center => ("(w-text_w)/2".to_string(), "(h-text_h)/2".to_string()),
        SubtitlePosition::Custom => (style.custom_x.to_string(), style.custom_y.to_string()),
    }
}

/// Append one gated text stage per segment and return the final pad.
///
/// An empty segment sequence returns `video_in` untouched.
pub fn plan_subtitles(
    segments: &[SubtitleSegment],
    style: &SubtitleStyle,
    base_width: u32,
    graph: &mut FilterGraph,
    video_in: StreamRef,
) -> StreamRef {
    if segments.is_empty() {
        return video_in;
    }

    let max_width_px = if style.max_text_width_px == 0 {
        (base_width as f64 * 0.8) as u32
    } else {
        style.max_text_width_px
    };
    let font_file = escape_text(&style.font_path.to_string_lossy());
    let (x, y) = subtitle_position_exprs(style);

    let mut current = video_in;
    for (index, segment) in segments.iter().enumerate() {
        let wrapped = wrap_text(&segment.text, max_width_px, style.font_size);
        let text = escape_text(&wrapped);

        let box_part = if style.box_opacity > 0.0 {
            format!(":box=1:boxcolor={}@{}", style.box_color, style.box_opacity)
        } else {
            String::new()
        };

        let filter = format!(
            "drawtext=text='{text}':fontfile='{font_file}':fontsize={size}:fontcolor={color}{box_part}:x={x}:y={y}:enable='between(t,{start},{end})'",
            size = style.font_size,
            color = style.font_color,
            start = segment.start_secs,
            end = segment.end_secs,
        );

        current = graph.stage(&[&current], filter, &format!("sub{index}"));
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_wrap_zero_width_is_identity() {
        assert_eq!(wrap_text("anything at all here", 0, 24), "anything at all here");
    }

    #[test]
    fn test_wrap_short_text_is_unchanged() {
        assert_eq!(wrap_text("short", 400, 24), "short");
    }

    #[test]
    fn test_wrap_packs_greedily() {
        // font 24 -> avg 10.92px/char -> 110px / 10.92 = 10 chars per line
        let wrapped = wrap_text("alfa beta gama delt echo foxt", 110, 24);
        assert_eq!(wrapped, "alfa beta\ngama delt\necho foxt");
    }

    #[test]
    fn test_wrap_line_limit_floors_at_ten_chars() {
        // 10px at font 24 would allow zero chars; the floor keeps lines usable
        let wrapped = wrap_text("aaaa bbbb cccc", 10, 24);
        assert_eq!(wrapped, "aaaa bbbb\ncccc");
    }

    #[test]
    fn test_wrap_overlong_word_stands_alone() {
        let wrapped = wrap_text("hi incomprehensibilities yo", 110, 24);
        assert_eq!(wrapped, "hi\nincomprehensibilities\nyo");
    }

    #[test]
    fn test_wrap_no_line_exceeds_limit_except_long_words() {
        let wrapped = wrap_text("one two three four five six seven eight", 110, 24);
        for line in wrapped.split('\n') {
            assert!(line.chars().count() <= 10, "line too long: {line:?}");
        }
    }

    #[test]
    fn test_escape_clean_line_is_identity() {
        assert_eq!(escape_text("plain words only"), "plain words only");
    }

    #[test]
    fn test_escape_specials() {
        assert_eq!(escape_text("100% done: it's"), "100\\% done\\: it\\'s");
    }

    #[test]
    fn test_escape_backslash_first() {
        // A backslash in the input must not double-process the escapes
        // it introduces for the other characters.
        assert_eq!(escape_text("a\\b:c"), "a\\\\b\\:c");
    }

    #[test]
    fn test_escape_preserves_line_breaks() {
        assert_eq!(escape_text("a:b\nc%d"), "a\\:b\nc\\%d");
    }

    #[test]
    fn test_escape_is_not_idempotent() {
        let once = escape_text("\\");
        let twice = escape_text(&once);
        assert_eq!(once, "\\\\");
        assert_eq!(twice, "\\\\\\\\");
        assert_ne!(once, twice);
    }

    fn style() -> SubtitleStyle {
        SubtitleStyle {
            font_path: PathBuf::from("/usr/share/fonts/test.ttf"),
            font_size: 24,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_segments_leave_graph_untouched() {
        let mut graph = FilterGraph::new();
        let video = StreamRef::video_input(0);
        let out = plan_subtitles(&[], &style(), 1920, &mut graph, video.clone());
        assert_eq!(out, video);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_segment_stage_is_gated_and_styled() {
        let mut graph = FilterGraph::new();
        let video = StreamRef::video_input(0);
        let segments = vec![SubtitleSegment::new("hello there", 1.0, 3.0)];

        let out = plan_subtitles(&segments, &style(), 1920, &mut graph, video);
        let filter = graph.filter_complex();

        assert_eq!(out.label(), "sub0");
        assert!(filter.contains("drawtext=text='hello there'"));
        assert!(filter.contains("fontfile='/usr/share/fonts/test.ttf'"));
        assert!(filter.contains("fontsize=24"));
        assert!(filter.contains("fontcolor=white"));
        assert!(filter.contains("box=1:boxcolor=black@0.5"));
        assert!(filter.contains("x=(w-text_w)/2"));
        assert!(filter.contains("y=h-text_h-50"));
        assert!(filter.contains("enable='between(t,1,3)'"));
    }

    #[test]
    fn test_segments_chain_in_input_order() {
        let mut graph = FilterGraph::new();
        let video = StreamRef::video_input(0);
        let segments = vec![
            SubtitleSegment::new("first", 0.0, 2.0),
            SubtitleSegment::new("second", 1.0, 4.0),
        ];

        let out = plan_subtitles(&segments, &style(), 1920, &mut graph, video);
        let filter = graph.filter_complex();

        assert_eq!(out.label(), "sub1");
        assert!(filter.contains("[0:v]drawtext=text='first'"));
        assert!(filter.contains("[sub0]drawtext=text='second'"));
    }

    #[test]
    fn test_wrapped_segment_is_escaped_per_line() {
        let mut graph = FilterGraph::new();
        let video = StreamRef::video_input(0);
        let segments = vec![SubtitleSegment::new(
            "alfa: beta gama: delt echo: foxt",
            1.0,
            3.0,
        )];
        let mut style = style();
        style.max_text_width_px = 120;

        plan_subtitles(&segments, &style, 1920, &mut graph, video);
        let filter = graph.filter_complex();

        assert!(filter.contains("alfa\\: beta\ngama\\: delt\necho\\: foxt"));
        assert!(filter.contains("enable='between(t,1,3)'"));
    }

    #[test]
    fn test_zero_box_opacity_omits_box() {
        let mut graph = FilterGraph::new();
        let video = StreamRef::video_input(0);
        let segments = vec![SubtitleSegment::new("hi", 0.0, 1.0)];
        let mut style = style();
        style.box_opacity = 0.0;

        plan_subtitles(&segments, &style, 1920, &mut graph, video);
        assert!(!graph.filter_complex().contains("box=1"));
    }

    #[test]
    fn test_custom_position_emits_literals() {
        let mut style = style();
        style.position = SubtitlePosition::Custom;
        style.custom_x = 120;
        style.custom_y = -40;
        let (x, y) = subtitle_position_exprs(&style);
        assert_eq!(x, "120");
        assert_eq!(y, "-40");
    }

    #[test]
    fn test_position_expr_table() {
        let mut style = style();

        style.position = SubtitlePosition::TopCenter;
        assert_eq!(
            subtitle_position_exprs(&style),
            ("(w-text_w)/2".to_string(), "50".to_string())
        );

        style.position = SubtitlePosition::BottomLeft;
        assert_eq!(
            subtitle_position_exprs(&style),
            ("50".to_string(), "h-text_h-50".to_string())
        );

        style.position = SubtitlePosition::BottomRight;
        assert_eq!(
            subtitle_position_exprs(&style),
            ("w-text_w-50".to_string(), "h-text_h-50".to_string())
        );

        style.position = SubtitlePosition::Center;
        assert_eq!(
            subtitle_position_exprs(&style),
            ("(w-text_w)/2".to_string(), "(h-text_h)/2".to_string())
        );
    }

    #[test]
    fn test_auto_width_wraps_against_base_width() {
        let mut graph = FilterGraph::new();
        let video = StreamRef::video_input(0);
        // 300px base -> auto width 240px -> 240 / (24 * 0.455) = 21 chars
        let segments = vec![SubtitleSegment::new(
            "twelve letter words spread across this line",
            0.0,
            2.0,
        )];

        plan_subtitles(&segments, &style(), 300, &mut graph, video);
        assert!(graph.filter_complex().contains('\n'));
    }
}

use crate::types::TranscriptSegment;

/// Format seconds as MM:SS timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let mins = (seconds / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    format!("{:02}:{:02}", mins, secs)
}

/// Format transcript segments with timestamps, marking highlighted
/// segments with a star.
pub fn format_transcript(segments: &[TranscriptSegment], highlight_ids: &[String]) -> String {
    segments
        .iter()
        .map(|seg| {
            let marker = if highlight_ids.contains(&seg.id) {
                "★"
            } else {
                " "
            };
            format!(
                "{} [{}] {}",
                marker,
                format_timestamp(seg.start),
                seg.text.trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_mm_ss() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(65.4), "01:05");
        assert_eq!(format_timestamp(3599.0), "59:59");
    }

    #[test]
    fn highlighted_segments_are_starred() {
        let segments = vec![
            TranscriptSegment {
                id: "a".to_string(),
                text: "plain".to_string(),
                start: 0.0,
                end: 1.0,
            },
            TranscriptSegment {
                id: "b".to_string(),
                text: "hooked".to_string(),
                start: 61.0,
                end: 62.0,
            },
        ];
        let rendered = format_transcript(&segments, &["b".to_string()]);
        assert!(rendered.contains("  [00:00] plain"));
        assert!(rendered.contains("★ [01:01] hooked"));
    }
}

//! Stream rows of the download dialog

use crate::core::{StreamKind, StreamOption};
use crate::render::escape;

/// Render the selectable rows for one stream list.
///
/// An empty list renders a single "none available" row.
pub fn render_stream_rows(video_id: &str, kind: StreamKind, streams: &[StreamOption]) -> String {
    if streams.is_empty() {
        return format!(
            r#"<div class="list-group-item stream-none">{}</div>"#,
            kind.none_available()
        );
    }

    streams
        .iter()
        .map(|stream| render_stream_row(video_id, stream))
        .collect()
}

fn render_stream_row(video_id: &str, stream: &StreamOption) -> String {
    format!(
        r#"
<button type="button" class="list-group-item list-group-item-action d-flex justify-content-between align-items-center" data-action="download-stream" data-video-id="{}" data-itag="{}">
    {} ({})
    <span class="badge bg-primary rounded-pill">{}</span>
</button>"#,
        escape(video_id),
        stream.itag,
        escape(&stream.label),
        escape(stream.container()),
        escape(&stream.size.to_string()),
    )
}

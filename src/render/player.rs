//! Embedded player and its action buttons

use crate::render::escape;

/// Privacy-enhanced embed host
pub const EMBED_HOST: &str = "https://www.youtube-nocookie.com/embed";

/// Embed URL: autoplay, no related videos, minimal branding, referrer tag
pub fn embed_url(video_id: &str) -> String {
    format!(
        "{}/{}?autoplay=1&rel=0&modestbranding=1&widget_referrer=youtube_proxy",
        EMBED_HOST,
        // an id is a single path segment
        video_id.replace(['/', '?', '#', '&'], "")
    )
}

/// Render the player card.
///
/// Download is always offered; Save only for logged-in users. Title and
/// thumbnail ride along on the Save button for the save request.
pub fn render_player(video_id: &str, title: &str, thumbnail: &str, logged_in: bool) -> String {
    let id = escape(video_id);

    let mut buttons = format!(
        r#"<button type="button" class="btn btn-sm btn-outline-success me-2" data-action="download" data-video-id="{}">
                    <i class="bi bi-download"></i> Download
                </button>"#,
        id
    );

    if logged_in {
        buttons.push_str(&format!(
            r#"
                <button type="button" class="btn btn-sm btn-outline-primary" data-action="save" data-video-id="{}" data-title="{}" data-thumbnail="{}">
                    <i class="bi bi-bookmark-plus"></i> Save to My Videos
                </button>"#,
            id,
            escape(title),
            escape(thumbnail)
        ));
    }

    format!(
        r#"
<div class="col-12">
    <div class="card">
        <div class="card-body">
            <div class="d-flex justify-content-end mb-2">
                {}
            </div>
            <div class="video-container">
                <iframe width="100%" height="100%" src="{}" frameborder="0" referrerpolicy="strict-origin-when-cross-origin" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe>
            </div>
        </div>
    </div>
</div>"#,
        buttons,
        escape(&embed_url(video_id))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_url() {
        assert_eq!(
            embed_url("dQw4w9WgXcQ"),
            "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ?autoplay=1&rel=0&modestbranding=1&widget_referrer=youtube_proxy"
        );
        assert!(embed_url("a/../b?x").starts_with("https://www.youtube-nocookie.com/embed/a..bx?"));
    }

    #[test]
    fn test_anonymous_player_has_download_only() {
        let html = render_player("v1", "Title", "https://i/t.jpg", false);
        assert!(html.contains(r#"data-action="download""#));
        assert!(!html.contains(r#"data-action="save""#));
        assert!(html.contains("youtube-nocookie.com/embed/v1?autoplay=1&amp;rel=0"));
    }

    #[test]
    fn test_logged_in_player_offers_save() {
        let html = render_player("v1", "It's \"quoted\"", "", true);
        assert!(html.contains(r#"data-action="save""#));
        assert!(html.contains("&quot;quoted&quot;"));
        assert!(!html.contains("It's"));
    }
}

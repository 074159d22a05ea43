//! Result grids for video and channel searches

use crate::core::{ChannelSummary, ResultItems, SearchResultSet, VideoSummary};
use crate::render::{escape, format_views};

/// Shown when a thumbnail fails to load
pub const FALLBACK_THUMBNAIL: &str =
    "https://via.placeholder.com/480x360.png?text=Thumbnail+Unavailable";

/// Shown when a channel has no avatar or it fails to load
pub const FALLBACK_AVATAR: &str = "https://via.placeholder.com/100x100.png?text=Channel";

const NO_DESCRIPTION: &str = "No description available";
const NO_SUBSCRIBERS: &str = "Subscriber count unavailable";

/// Render whichever kind of results the set holds
pub fn render_results(set: &SearchResultSet) -> String {
    match &set.items {
        ResultItems::Videos(items) => render_video_results(items, set.total_available),
        ResultItems::Channels(items) => render_channel_results(items, set.total_available),
    }
}

/// Render a video result grid
pub fn render_video_results(items: &[VideoSummary], total_available: usize) -> String {
    if items.is_empty() {
        return render_alert("info", "No videos found. Try a different search term.");
    }

    let mut html = render_header("Search Results", "videos", items.len(), total_available);
    for video in items {
        html.push_str(&render_video_card(video));
    }
    html
}

/// Render a channel result grid
pub fn render_channel_results(items: &[ChannelSummary], total_available: usize) -> String {
    if items.is_empty() {
        return render_alert("info", "No channels found. Try a different search term.");
    }

    let mut html = render_header("Channel Results", "channels", items.len(), total_available);
    for channel in items {
        html.push_str(&render_channel_card(channel));
    }
    html
}

/// Render a blocking inline error that replaces the results area
pub fn render_error(message: &str) -> String {
    render_alert("danger", message)
}

/// Render a full-width alert
pub fn render_alert(kind: &str, message: &str) -> String {
    format!(
        r#"
<div class="col-12">
    <div class="alert alert-{}" role="alert">
        {}
    </div>
</div>"#,
        escape(kind),
        escape(message)
    )
}

fn render_header(heading: &str, noun: &str, shown: usize, total_available: usize) -> String {
    let total = total_available.max(shown);
    let mut html = format!(
        r#"
<div class="col-12 mb-3">
    <div class="d-flex justify-content-between align-items-center">
        <h3>{}</h3>
        <span class="badge bg-secondary">{} of {} {} found</span>
    </div>
</div>"#,
        heading, shown, total, noun
    );

    if total > shown {
        html.push_str(&format!(
            r#"
<div class="col-12 mb-3">
    <div class="alert alert-info small partial-results" role="alert">
        <i class="bi bi-info-circle"></i>
        Showing {} of {} total {}. YouTube limits how many results we can fetch at once.
    </div>
</div>"#,
            shown, total, noun
        ));
    }
    html
}

fn render_video_card(video: &VideoSummary) -> String {
    let id = escape(&video.id);
    let title = escape(&video.title);
    let thumbnail = escape(&video.thumbnail_url);
    let description = escape(video.description.as_deref().unwrap_or(NO_DESCRIPTION));

    let channel_link = match &video.channel_id {
        Some(channel_id) => format!(
            r#"<a href="/channel/{}" class="channel-link" title="Visit channel">"#,
            escape(channel_id)
        ),
        None => r##"<a href="#" class="channel-link disabled" title="Visit channel" aria-disabled="true" tabindex="-1">"##
            .to_string(),
    };

    format!(
        r#"
<div class="col-md-4 mb-4">
    <div class="card h-100">
        <div class="search-result" data-action="play" data-video-id="{id}" data-title="{title}" data-thumbnail="{thumbnail}">
            <div class="thumbnail-container">
                <img src="{thumbnail}" class="card-img-top" alt="{title}" onerror="this.onerror=null;this.src='{fallback}'">
                <span class="duration-badge">{duration}</span>
            </div>
            <div class="card-body">
                <h5 class="card-title text-truncate" title="{title}">{title}</h5>
                <p class="card-text description text-muted small">{description}</p>
            </div>
        </div>
        <div class="card-footer bg-transparent border-top-0">
            {channel_link}
                <small class="text-muted"><i class="bi bi-person-circle"></i> {channel}</small>
            </a>
            <div class="video-meta">
                <small class="text-muted d-block"><i class="bi bi-eye"></i> {views}</small>
                <small class="text-muted d-block"><i class="bi bi-clock"></i> {published}</small>
            </div>
        </div>
    </div>
</div>"#,
        id = id,
        title = title,
        thumbnail = thumbnail,
        fallback = FALLBACK_THUMBNAIL,
        duration = escape(&video.duration_label),
        description = description,
        channel_link = channel_link,
        channel = escape(&video.channel_name),
        views = escape(&format_views(&video.views_raw)),
        published = escape(&video.publish_time_label),
    )
}

fn render_channel_card(channel: &ChannelSummary) -> String {
    let name = escape(&channel.name);
    let avatar = escape(channel.thumbnail_url.as_deref().unwrap_or(FALLBACK_AVATAR));

    format!(
        r#"
<div class="col-md-4 mb-4">
    <div class="card h-100">
        <div class="channel-result">
            <div class="channel-image-container text-center mt-3">
                <img src="{avatar}" class="channel-image rounded-circle" alt="{name}" onerror="this.onerror=null;this.src='{fallback}'">
            </div>
            <div class="card-body text-center">
                <h5 class="card-title">{name}</h5>
                <p class="card-text text-muted small">{subscribers}</p>
                <p class="card-text description text-muted small">{description}</p>
                <a href="/channel/{id}" class="btn btn-primary btn-sm mt-2">View Channel</a>
            </div>
        </div>
    </div>
</div>"#,
        avatar = avatar,
        name = name,
        fallback = FALLBACK_AVATAR,
        subscribers = escape(channel.subscriber_count_label.as_deref().unwrap_or(NO_SUBSCRIBERS)),
        description = escape(channel.description.as_deref().unwrap_or(NO_DESCRIPTION)),
        id = escape(&channel.id),
    )
}

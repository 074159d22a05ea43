//! Terminal output for the page driver

use crate::cli::args::VerbosityLevel;
use crate::core::{
    ChannelSummary, DownloadPhase, DownloadSession, ResultItems, SearchResultSet, StreamOption,
    VideoSummary,
};
use crate::page::{MemoryPage, Region};
use crate::render::{embed_url, format_views};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Output formatter for tubefront
pub struct OutputFormatter {
    verbosity: VerbosityLevel,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self { verbosity }
    }

    /// Spinner shown while the backend works; none in quiet mode
    pub fn start_spinner(&self, message: &str) -> Option<ProgressBar> {
        if self.verbosity == VerbosityLevel::Quiet {
            return None;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    }

    /// Stop a spinner started by [`OutputFormatter::start_spinner`]
    pub fn finish_spinner(&self, spinner: Option<ProgressBar>) {
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
    }

    /// Print success message
    pub fn success(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("✅ {}", message.green());
        }
    }

    /// Print warning message
    pub fn warning(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            eprintln!("⚠️  {}", message.yellow());
        }
    }

    /// Print error message
    pub fn error(&self, message: &str) {
        eprintln!("❌ {}", message.red());
    }

    /// Print debug message
    pub fn debug(&self, message: &str) {
        if self.verbosity == VerbosityLevel::Verbose {
            println!("🐛 {}", message);
        }
    }

    /// Print a search result set
    pub fn print_results(&self, set: &SearchResultSet) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        let noun = match &set.items {
            ResultItems::Videos(_) => "videos",
            ResultItems::Channels(_) => "channels",
        };
        println!(
            "🔎 {} of {} {} found",
            set.items.len(),
            set.total_available,
            noun
        );
        if set.is_partial() {
            println!(
                "{}",
                "   More matches exist than the backend returns at once.".yellow()
            );
        }
        println!();

        match &set.items {
            ResultItems::Videos(videos) => videos.iter().for_each(|v| self.print_video(v)),
            ResultItems::Channels(channels) => {
                channels.iter().for_each(|c| self.print_channel(c))
            }
        }
    }

    fn print_video(&self, video: &VideoSummary) {
        println!("📹 {} {}", video.title.bold(), format!("[{}]", video.id).dimmed());
        let mut details = vec![video.channel_name.clone()];
        if !video.views_raw.is_empty() {
            details.push(format_views(&video.views_raw));
        }
        if !video.duration_label.is_empty() {
            details.push(video.duration_label.clone());
        }
        if !video.publish_time_label.is_empty() {
            details.push(video.publish_time_label.clone());
        }
        println!("   {}", details.join(" • "));
    }

    fn print_channel(&self, channel: &ChannelSummary) {
        println!(
            "👤 {} {}",
            channel.name.bold(),
            format!("[{}]", channel.id).dimmed()
        );
        if let Some(subscribers) = &channel.subscriber_count_label {
            println!("   {}", subscribers);
        }
    }

    /// Print the download dialog contents
    pub fn print_download_options(&self, page: &MemoryPage, session: &DownloadSession) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        println!("📹 {}", page.text(Region::DownloadTitle).bold());
        println!("👤 {}", page.text(Region::DownloadAuthor));
        println!("⏱️  {}", page.text(Region::DownloadLength));
        println!();
        self.print_streams("Video streams", &session.video_streams);
        self.print_streams("Audio streams", &session.audio_streams);
    }

    fn print_streams(&self, heading: &str, streams: &[StreamOption]) {
        println!("{}", heading.cyan());
        if streams.is_empty() {
            println!("   none available");
        }
        for stream in streams {
            println!(
                "  📋 itag={} | {} | {} | {}",
                stream.itag,
                stream.label,
                stream.container(),
                stream.size
            );
        }
    }

    /// Print the outcome of a download request
    pub fn print_download_outcome(&self, page: &MemoryPage, phase: DownloadPhase) {
        match phase {
            DownloadPhase::DownloadSucceeded => {
                let href = page
                    .attribute(Region::DownloadLink, "href")
                    .unwrap_or_default();
                self.success(&format!("Download ready: {}", href));
            }
            DownloadPhase::DownloadFailed | DownloadPhase::OptionsFailed => {
                self.error(&page.text(Region::DownloadError));
            }
            other => self.debug(&format!("Download dialog is {:?}", other)),
        }
    }

    /// Print the embed URL of the player
    pub fn print_player(&self, video_id: &str, save_offered: bool) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        println!("▶️  {}", embed_url(video_id));
        if save_offered {
            println!("   Save to My Videos is available");
        }
    }

    /// Print the markup of every visible region
    pub fn print_markup(&self, page: &MemoryPage) {
        for region in page.visible_regions() {
            let html = page.html(region);
            if html.trim().is_empty() {
                continue;
            }
            println!("{}", region.to_string().cyan());
            println!("{}", html.trim());
            println!();
        }
        for toast in page.toasts() {
            println!("{}", "#toast".cyan());
            println!("{}", toast.trim());
            println!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SearchMode;
    use crate::page::Page;

    #[test]
    fn test_output_formatter_verbosity_levels() {
        let formatter = OutputFormatter::new(VerbosityLevel::Normal);
        assert_eq!(formatter.verbosity, VerbosityLevel::Normal);

        let formatter = OutputFormatter::new(VerbosityLevel::Quiet);
        assert_eq!(formatter.verbosity, VerbosityLevel::Quiet);
    }

    #[test]
    fn test_spinner_quiet_mode() {
        let formatter = OutputFormatter::new(VerbosityLevel::Quiet);
        assert!(formatter.start_spinner("Searching...").is_none());
    }

    #[test]
    fn test_spinner_normal_mode() {
        let formatter = OutputFormatter::new(VerbosityLevel::Normal);
        let spinner = formatter.start_spinner("Searching...");
        assert!(spinner.is_some());
        formatter.finish_spinner(spinner);
    }

    #[test]
    fn test_print_results() {
        let formatter = OutputFormatter::new(VerbosityLevel::Normal);
        let set = SearchResultSet::new(
            ResultItems::Videos(vec![VideoSummary {
                id: "v1".to_string(),
                title: "Cats".to_string(),
                views_raw: "1,234,567 views".to_string(),
                ..Default::default()
            }]),
            Some(40),
        );
        // Should not panic
        formatter.print_results(&set);
        formatter.print_results(&SearchResultSet::empty(SearchMode::Channels));
    }

    #[test]
    fn test_print_download_outcome() {
        let formatter = OutputFormatter::new(VerbosityLevel::Quiet);
        let page = MemoryPage::search_page();
        page.set_attribute(Region::DownloadLink, "href", "/downloads/a.mp4");
        // Should not panic
        formatter.print_download_outcome(&page, DownloadPhase::DownloadSucceeded);
        formatter.print_download_outcome(&page, DownloadPhase::DownloadFailed);
        formatter.print_download_outcome(&page, DownloadPhase::Idle);
    }

    #[test]
    fn test_print_markup() {
        let formatter = OutputFormatter::new(VerbosityLevel::Normal);
        let page = MemoryPage::search_page();
        page.set_html(Region::SearchResults, "<div>results</div>");
        // Should not panic
        formatter.print_markup(&page);
    }
}

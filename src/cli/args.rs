//! Command line argument parsing

use crate::api::ClientConfig;
use crate::core::{PageContext, SearchMode};
use crate::error::FrontError;
use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;

/// tubefront - search, play and download videos through a tubefront backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Backend base URL
    #[arg(long, value_name = "URL", default_value = "http://127.0.0.1:5000")]
    pub base_url: String,

    /// HTTP timeout (e.g., 30s, 1m); requests wait indefinitely when unset
    #[arg(long, value_name = "DURATION")]
    pub timeout: Option<humantime::Duration>,

    /// Override User-Agent header
    #[arg(long, value_name = "USER_AGENT")]
    pub user_agent: Option<String>,

    /// Session cookie of a logged-in user (e.g., 'session=...')
    #[arg(long, value_name = "COOKIE")]
    pub cookie: Option<String>,

    /// Act as a logged-in user (offers Save)
    #[arg(long)]
    pub logged_in: bool,

    /// URL of the page being driven; a channel page forces channel search
    #[arg(long, value_name = "URL")]
    pub page_url: Option<String>,

    /// Print rendered page regions
    #[arg(long)]
    pub show_markup: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What to do on the page
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Search for channels or videos
    Search {
        /// Search text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Search mode
        #[arg(short, long, value_enum, default_value = "channels")]
        mode: ModeArg,
    },
    /// List the downloadable streams of a video
    Options {
        /// Video ID
        video_id: String,
    },
    /// Have the backend produce a stream of a video
    Download {
        /// Video ID
        video_id: String,

        /// Stream itag (see `options`)
        #[arg(long)]
        itag: u32,
    },
    /// Save a video to the logged-in user's collection
    Save {
        /// Video ID
        video_id: String,

        /// Title stored with the video
        #[arg(long, default_value = "")]
        title: String,

        /// Thumbnail URL stored with the video
        #[arg(long, default_value = "")]
        thumbnail: String,
    },
    /// Print the embed player for a video
    Play {
        /// Video ID
        video_id: String,
    },
}

/// Search mode
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    /// Channel search
    Channels,
    /// Video search
    Videos,
}

impl From<ModeArg> for SearchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Channels => SearchMode::Channels,
            ModeArg::Videos => SearchMode::Videos,
        }
    }
}

impl Args {
    /// Get HTTP timeout as Duration
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.map(Into::into)
    }

    /// Backend client settings
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default().with_base_url(self.base_url.clone());
        if let Some(timeout) = self.timeout_duration() {
            config = config.with_timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }
        if let Some(cookie) = &self.cookie {
            config = config.with_session_cookie(cookie.clone());
        }
        config
    }

    /// Page flags derived from `--page-url` and `--logged-in`
    pub fn page_context(&self) -> Result<PageContext, FrontError> {
        match &self.page_url {
            Some(page_url) => PageContext::from_url(page_url, self.logged_in),
            None => Ok(PageContext::default().with_logged_in(self.logged_in)),
        }
    }

    /// Whether the driven page is a channel page
    pub fn is_channel_page(&self) -> bool {
        self.page_url
            .as_deref()
            .map(|url| url.contains("/channel"))
            .unwrap_or(false)
    }

    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal
    Normal,
    /// Verbose (debug info)
    Verbose,
}

// Implement Default for Args to make tests work
impl Default for Args {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout: None,
            user_agent: None,
            cookie: None,
            logged_in: false,
            page_url: None,
            show_markup: false,
            verbose: false,
            quiet: false,
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_verbosity_level() {
        let args = Args {
            quiet: false,
            verbose: false,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level(), VerbosityLevel::Normal);

        let args = Args {
            quiet: true,
            verbose: true,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level(), VerbosityLevel::Quiet);

        let args = Args {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level(), VerbosityLevel::Verbose);
    }

    #[test]
    fn test_parse_search_command() {
        let args = Args::try_parse_from([
            "tubefront",
            "--timeout",
            "1m",
            "search",
            "--mode",
            "videos",
            "funny",
            "cats",
        ])
        .unwrap();

        assert_eq!(args.timeout_duration(), Some(Duration::from_secs(60)));
        assert_eq!(
            args.command,
            Some(Command::Search {
                query: vec!["funny".to_string(), "cats".to_string()],
                mode: ModeArg::Videos,
            })
        );
    }

    #[test]
    fn test_parse_download_requires_itag() {
        assert!(Args::try_parse_from(["tubefront", "download", "v1"]).is_err());

        let args = Args::try_parse_from(["tubefront", "download", "v1", "--itag", "22"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Download {
                video_id: "v1".to_string(),
                itag: 22
            })
        );
    }

    #[test]
    fn test_client_config_from_args() {
        let args = Args {
            base_url: "http://backend:8000".to_string(),
            cookie: Some("session=abc".to_string()),
            ..Default::default()
        };
        let config = args.client_config();
        assert_eq!(config.base_url, "http://backend:8000");
        assert_eq!(config.timeout, None);
        assert_eq!(config.session_cookie.as_deref(), Some("session=abc"));
    }

    #[test]
    fn test_page_context_from_args() {
        let args = Args {
            logged_in: true,
            page_url: Some("http://127.0.0.1:5000/channel/UC123".to_string()),
            ..Default::default()
        };
        let context = args.page_context().unwrap();
        assert!(context.logged_in);
        assert!(context.force_channels);
        assert!(args.is_channel_page());

        let context = Args::default().page_context().unwrap();
        assert!(!context.logged_in);
        assert!(!context.force_channels);
    }

    #[test]
    fn test_args_default_values() {
        let args = Args::default();
        assert_eq!(args.base_url, "http://127.0.0.1:5000");
        assert_eq!(args.timeout_duration(), None);
        assert_eq!(args.user_agent, None);
        assert!(!args.logged_in);
        assert!(!args.show_markup);
        assert_eq!(args.command, None);
    }

    #[test]
    fn test_mode_arg_into_search_mode() {
        assert_eq!(SearchMode::from(ModeArg::Channels), SearchMode::Channels);
        assert_eq!(SearchMode::from(ModeArg::Videos), SearchMode::Videos);
    }
}

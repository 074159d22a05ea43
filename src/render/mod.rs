//! Markup rendering
//!
//! Every function here is pure: the same input always yields the same
//! markup. All backend-sourced strings go through [`escape`] before they are
//! placed in a text or attribute position.

pub mod download;
pub mod format;
pub mod player;
pub mod results;
pub mod toast;

pub use download::*;
pub use format::*;
pub use player::*;
pub use results::*;
pub use toast::*;

/// Escape a string for a text node or a quoted attribute
pub fn escape(input: &str) -> String {
    html_escape::encode_quoted_attribute(input).into_owned()
}

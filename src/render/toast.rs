//! Toast markup

use crate::render::escape;

/// Toast colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Warning,
    Danger,
}

impl ToastLevel {
    fn background(&self) -> &'static str {
        match self {
            ToastLevel::Success => "bg-success",
            ToastLevel::Warning => "bg-warning",
            ToastLevel::Danger => "bg-danger",
        }
    }
}

/// Body of a toast: an optional bold lead, the message, an optional note
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastBody {
    pub lead: Option<String>,
    pub message: String,
    pub note: Option<String>,
}

impl ToastBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_lead(mut self, lead: impl Into<String>) -> Self {
        self.lead = Some(lead.into());
        self
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }
}

/// Render a toast element
pub fn render_toast(level: ToastLevel, body: &ToastBody) -> String {
    let lead = body
        .lead
        .as_deref()
        .map(|lead| format!("<strong>{}</strong> ", escape(lead)))
        .unwrap_or_default();
    let note = body
        .note
        .as_deref()
        .map(|note| format!(r#"<br><small class="text-light">{}</small>"#, escape(note)))
        .unwrap_or_default();

    format!(
        r#"<div class="toast align-items-center text-white {} border-0 position-fixed bottom-0 end-0 m-3" role="alert" aria-live="assertive" aria-atomic="true">
    <div class="d-flex">
        <div class="toast-body">{}{}{}</div>
        <button type="button" class="btn-close btn-close-white me-2 m-auto" data-bs-dismiss="toast" aria-label="Close"></button>
    </div>
</div>"#,
        level.background(),
        lead,
        escape(&body.message),
        note
    )
}

use crate::types::SubjectRef;

/// Produces the message actually stored on a [`crate::TypedError`].
///
/// `translate` asks the implementation to localize or otherwise transform the
/// text before display. Implementations must return a non-empty string for a
/// non-empty `raw`.
pub trait MessageRenderer: Sync {
    fn render(&self, raw: &str, translate: bool) -> String;
}

/// Renders an account or wallet reference for embedding in a message.
pub trait SubjectFormatter: Sync {
    fn format_subject(&self, subject: &SubjectRef) -> String;
}

/// Emits every rendered message as a `tracing` error event and stores it unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRenderer;

impl MessageRenderer for LogRenderer {
    fn render(&self, raw: &str, translate: bool) -> String {
        tracing::error!(translate, "{raw}");
        raw.to_string()
    }
}

/// Formats a subject as its bare name.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameFormatter;

impl SubjectFormatter for NameFormatter {
    fn format_subject(&self, subject: &SubjectRef) -> String {
        subject.name.clone()
    }
}

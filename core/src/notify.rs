//! Routes errors into the toast store.

use std::fmt;

use crate::toast::ToastStore;

/// Builds the deferred error handler for `title`: every error it receives
/// becomes one warning toast and one `warn` log line.
///
/// ```
/// use dashboard_core::{show_error, ToastStore};
///
/// let toasts = ToastStore::new();
/// let on_error = show_error(&toasts, "Load failed");
/// on_error("boom");
/// assert_eq!(toasts.items()[0].message, "Load failed\r\n\r\nError: boom");
/// ```
pub fn show_error<E>(toasts: &ToastStore, title: impl Into<String>) -> impl Fn(E) + Clone
where
    E: fmt::Display + fmt::Debug,
{
    let toasts = toasts.clone();
    let title = title.into();
    move |error: E| {
        toasts.warn(error_message(&title, &error));
        tracing::warn!(error = ?error, "{title}");
    }
}

/// `"<title>\r\n\r\nError: <error>"`, the layout the dashboard UI expects.
pub fn error_message(title: &str, error: &dyn fmt::Display) -> String {
    format!("{title}\r\n\r\nError: {error}")
}

/// Attach `show_error` to a `Result` in one call.
pub trait ShowErrorExt<T> {
    fn or_show_error(self, toasts: &ToastStore, title: &str) -> Option<T>;
}

impl<T, E> ShowErrorExt<T> for Result<T, E>
where
    E: fmt::Display + fmt::Debug,
{
    fn or_show_error(self, toasts: &ToastStore, title: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                show_error(toasts, title)(error);
                None
            }
        }
    }
}

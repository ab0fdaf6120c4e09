//! Out-of-band notifications for error records.

pub mod credentials;
pub mod dispatcher;
pub mod http_client;
pub mod notify_error;
pub mod telegram;

pub use credentials::Credentials;
pub use dispatcher::{NotifyDispatcher, NotifyMode};
pub use notify_error::NotifyError;
pub use telegram::TelegramNotifier;

/// A best-effort, fire-and-forget notification channel.
///
/// Implementations must not panic and must not propagate failures: report
/// them locally and return.
pub trait Notify: Send + Sync {
    fn send(&self, message: &str);
}

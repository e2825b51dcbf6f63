mod notifier;
mod template;

pub use notifier::{Notifier, NotifySummary};
pub use template::EmailTemplate;

pub mod directory;
pub mod notifier;

pub use directory::{AdminDirectory, JsonFileDirectory};
pub use notifier::{admin_recipients, AdminNotifier};

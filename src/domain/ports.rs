use crate::utils::error::Result;

/// Receives the human-readable submission of the form.
pub trait Notifier {
    fn notify(&self, title: &str, body: &str) -> Result<()>;
}

pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

pub mod handlers;
pub mod pdf;

pub use pdf::{export_pdf, ExportError};

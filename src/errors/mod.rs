pub mod types;
pub mod classification;

pub use types::ScanError;
pub use classification::ErrorClassification;

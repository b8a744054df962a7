pub mod provider;
pub mod http;
pub mod memory;

pub use provider::{Page, PageFetcher};
pub use http::HttpFetcher;
pub use memory::MemoryFetcher;

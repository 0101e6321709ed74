pub mod adapters;
pub mod fetcher;
pub mod html;
pub mod posting;

pub use adapters::{load_adapters, AdapterRegistry, BoardAdapter, GenericAdapter, SiteAdapter};
pub use fetcher::{FetchConfig, HttpFetcher, PageFetcher};
pub use posting::JobPostingExtractor;

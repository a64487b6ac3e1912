mod fetcher;
mod page;
mod spider;

pub use fetcher::Fetcher;
pub use page::plain_text;
pub use spider::spider_targets;

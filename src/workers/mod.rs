//! Workers that run the dashboard's fetch pipelines

pub mod core;
pub mod fetcher;

pub use core::EventSender;
pub use fetcher::PipelineFetcher;

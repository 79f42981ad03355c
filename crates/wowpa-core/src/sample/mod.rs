//! Reading one sample from game memory and turning it into an output frame.

mod fetcher;
mod raw;

pub use fetcher::SampleFetcher;
pub use raw::{PlayerState, RawSample};

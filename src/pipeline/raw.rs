//! Raw sensor access
//!
//! Decoding proprietary raw files is delegated to the rawloader library;
//! this module wraps the decoded result behind the small read-only surface
//! the extraction stage needs.

mod rawloader_decoder;
mod source;
pub mod types;

pub use rawloader_decoder::RawloaderDecoder;
pub use source::{RawDecoder, RawSource};
pub use types::SensorFrame;

//! # Growable Containers
//!
//! The two custom containers the pools are built on: a resizable,
//! indexable sequence with zero-copy segment views, and a resizable,
//! seekable byte stream with an explicit compaction operation.
//!
//! Both are leaf utilities: they depend on nothing and never block.

mod sequence;
mod stream;

pub use sequence::SegmentList;
pub use stream::{ByteStream, SeekOrigin};

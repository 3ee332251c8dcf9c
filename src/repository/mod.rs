//! Repository Module
//!
//! Cache-aside access to every data category over one shared [`TtlCache`].
//!
//! [`TtlCache`]: crate::cache::TtlCache

mod cache_aside;

pub use cache_aside::CacheAsideRepository;

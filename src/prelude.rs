pub use crate::ds::{KeyIndex, RecencyList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentLruCache;
pub use crate::policy::lru::{LruCache, DEFAULT_CAPACITY_LIMIT};
pub use crate::stats::CacheStats;
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

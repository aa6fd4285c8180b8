use crate::{cache::ListingCache, db::DbPool};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub cache: ListingCache,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            cache: ListingCache::new(),
        }
    }
}

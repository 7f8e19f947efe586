use std::sync::Arc;

use crate::auth::IdentityClient;
use crate::db::Database;
use crate::feed::FeedService;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub feed: FeedService,
    pub identity: Arc<IdentityClient>,
}

impl AppState {
    pub fn new(db: Database, identity: IdentityClient) -> Self {
        let feed = FeedService::new(db.clone());
        Self {
            db,
            feed,
            identity: Arc::new(identity),
        }
    }
}

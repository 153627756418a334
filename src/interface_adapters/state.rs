use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::Profile;
use crate::domain::ports::{ProfileStore, UpstreamApi};

#[derive(Clone)]
pub struct AppState {
    // Arc<dyn Trait> lets tests swap the upstream client for a stub.
    pub upstream: Arc<dyn UpstreamApi>,
    pub profiles: InMemoryProfileStore,
}

// In-memory profile store keyed by guest id.
#[derive(Clone, Default)]
pub struct InMemoryProfileStore {
    pub profiles: Arc<Mutex<HashMap<u64, Profile>>>,
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn insert(&self, profile: Profile) -> Result<(), String> {
        let mut profiles = self.profiles.lock().await;
        profiles.insert(profile.guest_id, profile);
        Ok(())
    }
}

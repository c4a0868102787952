//! Rules Repository (Singleton)

use super::to_patch;
use crate::db::{RULES_KEY, StoreClient, StoreError, StoreResult};
use shared::models::{Rules, RulesUpdate};

#[derive(Clone)]
pub struct RulesRepository {
    store: StoreClient,
}

impl RulesRepository {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Get the rules, seeding the defaults on first miss
    pub async fn get_or_create(&self) -> StoreResult<Rules> {
        if let Some(rules) = self.get().await? {
            return Ok(rules);
        }

        match self.store.insert(Rules::default()).await {
            Ok(rules) => {
                tracing::info!("Rules singleton created with defaults");
                Ok(rules)
            }
            // Created concurrently by someone else
            Err(StoreError::Conflict(_)) => self
                .get()
                .await?
                .ok_or_else(|| StoreError::NotFound(format!("rules:{RULES_KEY}"))),
            Err(e) => Err(e),
        }
    }

    pub async fn get(&self) -> StoreResult<Option<Rules>> {
        self.store.get(RULES_KEY).await
    }

    /// Partial update; `None` fields keep their stored value
    pub async fn update(&self, data: RulesUpdate) -> StoreResult<Rules> {
        data.validate().map_err(StoreError::Validation)?;
        let patch = to_patch(&data)?;
        self.get_or_create().await?;
        self.store.merge(RULES_KEY, patch).await
    }
}

//! Body-weight entry service.

use crate::cache::{cache_keys, CacheAside};
use crate::dto::{CreateWeightRequest, DeletedResponse, UpdateWeightRequest, WeightCreatedResponse, WeightUpdatedResponse};
use chrono::Utc;
use fitlog_config::CacheTtlConfig;
use fitlog_core::{FitlogError, FitlogResult, Interface, UserRole, Weight, WeightId};
use fitlog_repository::{WeightQuery, WeightRepository};
use fitlog_security::{Claims, ClaimsExt};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

const RESOURCE: &str = "Weight data";

/// Weight service trait.
#[async_trait]
pub trait WeightService: Interface + Send + Sync {
    /// Gets an entry by ID. Owner or admin.
    async fn get_weight(&self, claims: &Claims, id: WeightId) -> FitlogResult<Weight>;

    /// Lists entries matching `query`, most recent date first.
    async fn list_weights(&self, claims: &Claims, query: WeightQuery) -> FitlogResult<Vec<Weight>>;

    /// Records an entry for the caller.
    async fn create_weight(&self, claims: &Claims, request: CreateWeightRequest) -> FitlogResult<WeightCreatedResponse>;

    /// Applies the valid fields of `request`. Creator only.
    async fn update_weight(
        &self,
        claims: &Claims,
        id: WeightId,
        request: UpdateWeightRequest,
    ) -> FitlogResult<WeightUpdatedResponse>;

    /// Deletes an entry. Creator only.
    async fn delete_weight(&self, claims: &Claims, id: WeightId) -> FitlogResult<DeletedResponse>;
}

/// Weight service implementation.
pub struct WeightServiceImpl {
    weight_repository: Arc<dyn WeightRepository>,
    cache: CacheAside,
    ttl: CacheTtlConfig,
}

impl WeightServiceImpl {
    pub fn new(weight_repository: Arc<dyn WeightRepository>, cache: CacheAside, ttl: CacheTtlConfig) -> Self {
        Self {
            weight_repository,
            cache,
            ttl,
        }
    }

    async fn owned_entry(&self, claims: &Claims, id: WeightId) -> FitlogResult<Weight> {
        let entry = self
            .weight_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| FitlogError::not_found(RESOURCE, id))?;
        claims.require_owner(entry.user_id)?;
        Ok(entry)
    }
}

#[async_trait]
impl WeightService for WeightServiceImpl {
    async fn get_weight(&self, claims: &Claims, id: WeightId) -> FitlogResult<Weight> {
        debug!("Getting weight entry: {}", id);

        let key = cache_keys::weight_by_id(id)?;
        let entry = self
            .cache
            .read_through(&key, self.ttl.weight_by_id(), || async {
                self.weight_repository.find_by_id(id).await
            })
            .await?
            .ok_or_else(|| FitlogError::not_found(RESOURCE, id))?;

        claims.require_role_or_owner(UserRole::Admin, entry.user_id)?;
        Ok(entry)
    }

    async fn list_weights(&self, claims: &Claims, query: WeightQuery) -> FitlogResult<Vec<Weight>> {
        debug!("Listing weight entries: {:?}", query);
        claims.require_role_or_owner(UserRole::Admin, query.user_id)?;

        let key = cache_keys::weight_list(&query)?;
        self.cache
            .read_through(&key, self.ttl.weight_list(), || async {
                self.weight_repository.find_by_user(&query).await
            })
            .await
    }

    async fn create_weight(&self, claims: &Claims, request: CreateWeightRequest) -> FitlogResult<WeightCreatedResponse> {
        let entry = request.into_weight(claims.user_id(), Utc::now())?;
        let saved = self.weight_repository.save(&entry).await?;

        info!("Weight entry created: {} for user {}", saved.id, saved.user_id);
        Ok(WeightCreatedResponse::from(saved))
    }

    async fn update_weight(
        &self,
        claims: &Claims,
        id: WeightId,
        request: UpdateWeightRequest,
    ) -> FitlogResult<WeightUpdatedResponse> {
        self.owned_entry(claims, id).await?;

        let update = request.to_update(Utc::now());
        let updated = self
            .weight_repository
            .update(id, update)
            .await?
            .ok_or_else(|| FitlogError::not_found(RESOURCE, id))?;

        info!("Weight entry updated: {}", id);
        Ok(WeightUpdatedResponse::from(updated))
    }

    async fn delete_weight(&self, claims: &Claims, id: WeightId) -> FitlogResult<DeletedResponse> {
        self.owned_entry(claims, id).await?;

        let deleted = self.weight_repository.delete(id).await?;
        info!("Weight entry deleted: {}", id);
        Ok(DeletedResponse::new(deleted))
    }
}

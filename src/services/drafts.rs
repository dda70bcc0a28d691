// ABOUTME: Server-side store for pending shopping-list drafts awaiting user review
// ABOUTME: Drafts are addressable by id, owned by one user, single use and time bounded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

use crate::config::DraftConfig;
use crate::models::{PendingItem, UserId};
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Aggregated items held between "generate" and "confirm"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListDraft {
    /// Handle returned to the client
    pub id: Uuid,
    /// Owner; nobody else can take the draft
    pub user_id: UserId,
    /// Aggregator output
    pub items: Vec<PendingItem>,
    /// When the draft was produced
    pub created_at: DateTime<Utc>,
    /// After this instant the draft can no longer be taken
    pub expires_at: DateTime<Utc>,
}

impl ShoppingListDraft {
    /// Whether the draft has outlived its TTL at `now`
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Concurrent draft store keyed by draft id
#[derive(Clone)]
pub struct DraftStore {
    drafts: Arc<DashMap<Uuid, ShoppingListDraft>>,
    ttl: Duration,
    max_entries: usize,
}

impl DraftStore {
    /// Create a store with the given lifetime and capacity
    #[must_use]
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            drafts: Arc::new(DashMap::new()),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Create a store from configuration
    #[must_use]
    pub fn from_config(config: &DraftConfig) -> Self {
        Self::new(config.ttl(), config.max_entries)
    }

    /// Store a fresh draft for `user_id`, evicting the oldest one when full
    pub fn insert(&self, user_id: UserId, items: Vec<PendingItem>) -> ShoppingListDraft {
        self.purge_expired();
        while self.drafts.len() >= self.max_entries {
            if !self.evict_oldest() {
                break;
            }
        }

        let now = Utc::now();
        let expires_at = TimeDelta::from_std(self.ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let draft = ShoppingListDraft {
            id: Uuid::new_v4(),
            user_id,
            items,
            created_at: now,
            expires_at,
        };
        self.drafts.insert(draft.id, draft.clone());
        debug!(draft.id = %draft.id, user.id = user_id, items = draft.items.len(), "Draft stored");
        draft
    }

    /// Remove and return the user's draft; drafts of other users stay put
    #[must_use]
    pub fn take(&self, user_id: UserId, draft_id: Uuid) -> Option<ShoppingListDraft> {
        let (_, draft) = self
            .drafts
            .remove_if(&draft_id, |_, draft| draft.user_id == user_id)?;
        if draft.is_expired(Utc::now()) {
            debug!(draft.id = %draft_id, "Draft expired before it was taken");
            return None;
        }
        Some(draft)
    }

    /// Drop every expired draft, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.drafts.len();
        self.drafts.retain(|_, draft| !draft.is_expired(now));
        before.saturating_sub(self.drafts.len())
    }

    /// Number of drafts currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    /// Whether no draft is held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    fn evict_oldest(&self) -> bool {
        let oldest = self
            .drafts
            .iter()
            .min_by_key(|entry| entry.value().created_at)
            .map(|entry| *entry.key());
        match oldest {
            Some(id) => {
                debug!(draft.id = %id, "Draft store full, evicting oldest draft");
                self.drafts.remove(&id).is_some()
            }
            None => false,
        }
    }
}

//! Guest Repository

use super::{RepoError, RepoResult};
use crate::db::SeatingStorage;
use shared::error::ErrorCode;
use shared::models::{Guest, GuestCreate, GuestQuery, GuestUpdate, normalize_dietary_tags};
use shared::util::snowflake_id;

#[derive(Clone)]
pub struct GuestRepository {
    storage: SeatingStorage,
}

impl GuestRepository {
    pub fn new(storage: SeatingStorage) -> Self {
        Self { storage }
    }

    /// Find guests matching the query, ordered by last name then first name
    pub fn find_all(&self, query: &GuestQuery) -> RepoResult<Vec<Guest>> {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut guests: Vec<Guest> = self
            .storage
            .get_all_guests()?
            .into_iter()
            .filter(|g| match &needle {
                Some(n) => {
                    g.first_name.to_lowercase().contains(n) || g.last_name.to_lowercase().contains(n)
                }
                None => true,
            })
            .filter(|g| match query.table_id {
                Some(table_id) => g.seat.is_some_and(|s| s.table_id == table_id),
                None => true,
            })
            .collect();

        guests.sort_by_cached_key(|g| (g.last_name.to_lowercase(), g.first_name.to_lowercase()));
        Ok(guests)
    }

    /// Find guest by id
    pub fn find_by_id(&self, id: i64) -> RepoResult<Option<Guest>> {
        Ok(self.storage.get_guest(id)?)
    }

    /// Create a new guest
    pub fn create(&self, data: GuestCreate) -> RepoResult<Guest> {
        let guest = Guest {
            id: snowflake_id(),
            first_name: data.first_name.trim().to_string(),
            last_name: data.last_name.trim().to_string(),
            dietary_tags: normalize_dietary_tags(&data.dietary_tags, data.other_dietary.as_deref()),
            seat: None,
        };

        let txn = self.storage.begin_write()?;
        self.storage.store_guest(&txn, &guest)?;
        txn.commit()?;

        tracing::debug!(guest_id = guest.id, "Guest created");
        Ok(guest)
    }

    /// Update a guest's name or dietary tags (the seat is owned by the engine)
    pub fn update(&self, id: i64, data: GuestUpdate) -> RepoResult<Guest> {
        let txn = self.storage.begin_write()?;
        let mut guest = self
            .storage
            .get_guest_txn(&txn, id)?
            .ok_or_else(|| not_found(id))?;

        if let Some(first_name) = data.first_name {
            guest.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = data.last_name {
            guest.last_name = last_name.trim().to_string();
        }
        if data.dietary_tags.is_some() || data.other_dietary.is_some() {
            let base: Vec<String> = match data.dietary_tags {
                Some(tags) => tags,
                None => guest.dietary_tags.iter().cloned().collect(),
            };
            guest.dietary_tags = normalize_dietary_tags(&base, data.other_dietary.as_deref());
        }

        self.storage.store_guest(&txn, &guest)?;
        txn.commit()?;

        Ok(guest)
    }

    /// Delete a guest together with its connections and seat
    pub fn delete(&self, id: i64) -> RepoResult<()> {
        let txn = self.storage.begin_write()?;
        if !self.storage.remove_guest(&txn, id)? {
            return Err(not_found(id));
        }
        let links = self.storage.remove_connections_of(&txn, id)?;
        let seated = self.storage.remove_assignment(&txn, id)?;
        txn.commit()?;

        tracing::debug!(guest_id = id, links, seated, "Guest deleted");
        Ok(())
    }
}

fn not_found(id: i64) -> RepoError {
    RepoError::NotFound(ErrorCode::GuestNotFound, format!("Guest {id} not found"))
}

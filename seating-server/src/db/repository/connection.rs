//! Connection Repository
//!
//! Links between two guests, stored once per unordered pair with the
//! smaller id first.

use super::{RepoError, RepoResult};
use crate::db::SeatingStorage;
use shared::error::ErrorCode;
use shared::models::{Connection, ConnectionQuery, ConnectionUpsert, canonical_pair};

#[derive(Clone)]
pub struct ConnectionRepository {
    storage: SeatingStorage,
}

impl ConnectionRepository {
    pub fn new(storage: SeatingStorage) -> Self {
        Self { storage }
    }

    /// Find connections, optionally only those touching one guest
    pub fn find_all(&self, query: &ConnectionQuery) -> RepoResult<Vec<Connection>> {
        let connections = self.storage.get_all_connections()?;
        Ok(match query.guest_id {
            Some(guest_id) => connections
                .into_iter()
                .filter(|c| c.involves(guest_id))
                .collect(),
            None => connections,
        })
    }

    /// Create a connection or change the type of an existing one
    pub fn upsert(&self, data: ConnectionUpsert) -> RepoResult<Connection> {
        if data.guest_a == data.guest_b {
            return Err(RepoError::Validation(
                ErrorCode::ConnectionSelfLink,
                "A guest cannot be linked to itself".to_string(),
            ));
        }
        let connection = Connection::new(data.guest_a, data.guest_b, data.kind);

        let txn = self.storage.begin_write()?;
        for id in [connection.guest_a, connection.guest_b] {
            if !self.storage.guest_exists_txn(&txn, id)? {
                return Err(RepoError::NotFound(
                    ErrorCode::GuestNotFound,
                    format!("Guest {id} not found"),
                ));
            }
        }
        self.storage.store_connection(&txn, &connection)?;
        txn.commit()?;

        tracing::debug!(
            guest_a = connection.guest_a,
            guest_b = connection.guest_b,
            kind = %connection.kind,
            "Connection saved"
        );
        Ok(connection)
    }

    /// Delete the connection between two guests, in either order
    pub fn delete(&self, x: i64, y: i64) -> RepoResult<()> {
        let (a, b) = canonical_pair(x, y);
        let txn = self.storage.begin_write()?;
        if !self.storage.remove_connection(&txn, a, b)? {
            return Err(RepoError::NotFound(
                ErrorCode::ConnectionNotFound,
                format!("Connection {a}-{b} not found"),
            ));
        }
        txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::GuestRepository;
    use shared::models::{ConnectionType, GuestCreate};

    fn setup() -> (ConnectionRepository, Vec<i64>) {
        let storage = SeatingStorage::open_in_memory().unwrap();
        let guests = GuestRepository::new(storage.clone());
        let ids = (0..3)
            .map(|i| {
                guests
                    .create(GuestCreate {
                        first_name: format!("G{i}"),
                        last_name: "Test".to_string(),
                        ..Default::default()
                    })
                    .unwrap()
                    .id
            })
            .collect();
        (ConnectionRepository::new(storage), ids)
    }

    fn upsert(a: i64, b: i64, kind: ConnectionType) -> ConnectionUpsert {
        ConnectionUpsert {
            guest_a: a,
            guest_b: b,
            kind,
        }
    }

    #[test]
    fn test_upsert_canonicalizes_and_overwrites() {
        let (repo, ids) = setup();
        let c = repo
            .upsert(upsert(ids[1], ids[0], ConnectionType::Positive))
            .unwrap();
        assert_eq!((c.guest_a, c.guest_b), (ids[0], ids[1]));

        repo.upsert(upsert(ids[0], ids[1], ConnectionType::Negative))
            .unwrap();
        let all = repo.find_all(&ConnectionQuery::default()).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].kind, ConnectionType::Negative);
    }

    #[test]
    fn test_upsert_rejects_self_link_and_unknown_guest() {
        let (repo, ids) = setup();
        assert!(matches!(
            repo.upsert(upsert(ids[0], ids[0], ConnectionType::Neutral)),
            Err(RepoError::Validation(ErrorCode::ConnectionSelfLink, _))
        ));
        assert!(matches!(
            repo.upsert(upsert(ids[0], 1, ConnectionType::Neutral)),
            Err(RepoError::NotFound(ErrorCode::GuestNotFound, _))
        ));
        assert!(repo.find_all(&ConnectionQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_filter_by_guest_and_delete_either_order() {
        let (repo, ids) = setup();
        repo.upsert(upsert(ids[0], ids[1], ConnectionType::Positive))
            .unwrap();
        repo.upsert(upsert(ids[1], ids[2], ConnectionType::Neutral))
            .unwrap();

        let of_first = repo
            .find_all(&ConnectionQuery {
                guest_id: Some(ids[0]),
            })
            .unwrap();
        assert_eq!(of_first.len(), 1);

        repo.delete(ids[2], ids[1]).unwrap();
        assert!(matches!(
            repo.delete(ids[1], ids[2]),
            Err(RepoError::NotFound(ErrorCode::ConnectionNotFound, _))
        ));
        assert_eq!(repo.find_all(&ConnectionQuery::default()).unwrap().len(), 1);
    }
}

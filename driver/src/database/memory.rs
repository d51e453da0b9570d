use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnMovieQuery, DependOnRentalQuery};
use kernel::interface::update::{DependOnMovieModifier, DependOnRentalModifier};
use kernel::prelude::entity::{Movie, MovieId, Rental, RentalId};
use kernel::KernelError;

pub use self::{movie::*, rental::*};

mod movie;
mod rental;

/// Process-local store, used for tests and local runs without PostgreSQL.
///
/// A transaction holds the store lock until it is committed or dropped,
/// so transactions never interleave.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<MemoryStore>>,
}

#[derive(Debug, Clone, Default)]
struct MemoryStore {
    rentals: HashMap<RentalId, Rental>,
    movies: HashMap<MovieId, Movie>,
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let committed = Arc::clone(&self.store).lock_owned().await;
        let staged = committed.clone();
        Ok(InMemoryTransaction { committed, staged })
    }
}

pub struct InMemoryTransaction {
    committed: OwnedMutexGuard<MemoryStore>,
    staged: MemoryStore,
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(mut self) -> error_stack::Result<(), KernelError> {
        *self.committed = self.staged;
        Ok(())
    }
}

impl DependOnRentalQuery for InMemoryDatabase {
    type RentalQuery = InMemoryRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &InMemoryRentalRepository
    }
}

impl DependOnRentalModifier for InMemoryDatabase {
    type RentalModifier = InMemoryRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &InMemoryRentalRepository
    }
}

impl DependOnMovieQuery for InMemoryDatabase {
    type MovieQuery = InMemoryMovieRepository;
    fn movie_query(&self) -> &Self::MovieQuery {
        &InMemoryMovieRepository
    }
}

impl DependOnMovieModifier for InMemoryDatabase {
    type MovieModifier = InMemoryMovieRepository;
    fn movie_modifier(&self) -> &Self::MovieModifier {
        &InMemoryMovieRepository
    }
}

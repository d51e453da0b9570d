use error_stack::Report;

use kernel::interface::query::MovieQuery;
use kernel::interface::update::MovieModifier;
use kernel::prelude::entity::{Movie, MovieId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryMovieRepository;

#[async_trait::async_trait]
impl MovieQuery for InMemoryMovieRepository {
    type Transaction = InMemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        Ok(con.staged.movies.get(id).cloned())
    }
}

#[async_trait::async_trait]
impl MovieModifier for InMemoryMovieRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError> {
        if con.staged.movies.contains_key(movie.id()) {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Movie {:?} already exists", movie.id())));
        }
        con.staged.movies.insert(movie.id().clone(), movie.clone());
        Ok(())
    }

    async fn increment_stock(
        &self,
        con: &mut InMemoryTransaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<bool, KernelError> {
        let Some(movie) = con.staged.movies.get_mut(movie_id) else {
            return Ok(false);
        };
        movie.restock();
        Ok(true)
    }
}

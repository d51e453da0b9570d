use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{CustomerId, MovieId, Rental, RentalId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryRentalRepository;

#[async_trait::async_trait]
impl RentalQuery for InMemoryRentalRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        Ok(con.staged.rentals.get(id).cloned())
    }

    async fn find_latest(
        &self,
        con: &mut InMemoryTransaction,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let found = con
            .staged
            .rentals
            .values()
            .filter(|rental| rental.customer().id() == customer_id)
            .filter(|rental| rental.movie().id() == movie_id)
            .max_by_key(|rental| {
                let date_out: &OffsetDateTime = rental.date_out().as_ref();
                (!rental.is_returned(), *date_out)
            })
            .cloned();
        Ok(found)
    }
}

#[async_trait::async_trait]
impl RentalModifier for InMemoryRentalRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        if con.staged.rentals.contains_key(rental.id()) {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Rental {:?} already exists", rental.id())));
        }
        con.staged
            .rentals
            .insert(rental.id().clone(), rental.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con.staged.rentals.get_mut(rental.id()) {
            *stored = rental.clone();
        }
        Ok(())
    }
}

use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnRentalQuery, RentalQuery};
use kernel::interface::update::{
    DependOnMovieModifier, DependOnRentalModifier, MovieModifier, RentalModifier,
};
use kernel::prelude::entity::{CustomerId, MovieId};
use kernel::KernelError;

use crate::transfer::{RentalDto, ReturnRentalDto};

#[async_trait::async_trait]
pub trait ReturnRentalService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnRentalQuery
    + DependOnRentalModifier
    + DependOnMovieModifier
{
    /// Closes the customer's rental of a movie and puts the copy back in stock.
    ///
    /// The rental update and the stock increment share one transaction.
    async fn return_rental(
        &self,
        dto: ReturnRentalDto,
    ) -> error_stack::Result<RentalDto, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let customer_id = CustomerId::new(dto.customer_id);
        let movie_id = MovieId::new(dto.movie_id);
        let mut rental = self
            .rental_query()
            .find_latest(&mut transaction, &customer_id, &movie_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable("Rental not found.")
            })?;

        // lookup does not filter on status
        if rental.is_returned() {
            return Err(Report::new(KernelError::AlreadyProcessed)
                .attach_printable("Return already processed."));
        }

        rental.mark_returned(dto.returned_at);
        self.rental_modifier()
            .update(&mut transaction, &rental)
            .await?;

        let restocked = self
            .movie_modifier()
            .increment_stock(&mut transaction, rental.movie().id())
            .await?;
        if !restocked {
            tracing::warn!(
                rental = ?rental.id(),
                movie = ?rental.movie().id(),
                "Returned movie is not in the catalogue, stock left unchanged"
            );
        }

        transaction.commit().await?;

        tracing::info!(
            rental = ?rental.id(),
            fee = ?rental.rental_fee(),
            "Rental returned"
        );
        Ok(RentalDto::from(rental))
    }
}

impl<T> ReturnRentalService for T where
    T: DependOnDatabaseConnection
        + DependOnRentalQuery
        + DependOnRentalModifier
        + DependOnMovieModifier
{
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use driver::database::{
        InMemoryDatabase, InMemoryMovieRepository, InMemoryRentalRepository, InMemoryTransaction,
    };
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{DependOnMovieQuery, DependOnRentalQuery, MovieQuery, RentalQuery};
    use kernel::interface::update::{
        DependOnMovieModifier, DependOnRentalModifier, MovieModifier, RentalModifier,
    };
    use kernel::prelude::entity::{
        CustomerId, CustomerName, CustomerPhone, CustomerSnapshot, DailyRentalRate, DateOut,
        Movie, MovieId, MovieSnapshot, MovieTitle, NumberInStock, Rental, RentalId,
    };
    use error_stack::Report;
    use kernel::KernelError;

    use crate::service::ReturnRentalService;
    use crate::transfer::ReturnRentalDto;

    struct Fixture {
        db: InMemoryDatabase,
        movie: Movie,
        rental: Rental,
    }

    async fn setup(date_out: OffsetDateTime) -> error_stack::Result<Fixture, KernelError> {
        let db = InMemoryDatabase::default();
        let movie = Movie::new(
            MovieId::new(Uuid::new_v4()),
            MovieTitle::new("12345"),
            DailyRentalRate::new(2),
            NumberInStock::new(10),
        );
        let rental = Rental::new(
            RentalId::new(Uuid::new_v4()),
            CustomerSnapshot::new(
                CustomerId::new(Uuid::new_v4()),
                CustomerName::new("Chris"),
                CustomerPhone::new("0900123456"),
            ),
            MovieSnapshot::from(&movie),
            DateOut::new(date_out),
            None,
            None,
        );

        let mut con = db.transact().await?;
        db.movie_modifier().create(&mut con, &movie).await?;
        db.rental_modifier().create(&mut con, &rental).await?;
        con.commit().await?;

        Ok(Fixture { db, movie, rental })
    }

    fn dto(rental: &Rental, returned_at: OffsetDateTime) -> ReturnRentalDto {
        ReturnRentalDto {
            customer_id: *rental.customer().id().as_ref(),
            movie_id: *rental.movie().id().as_ref(),
            returned_at,
        }
    }

    #[tokio::test]
    async fn return_closes_rental_and_restocks() -> error_stack::Result<(), KernelError> {
        let now = OffsetDateTime::now_utc();
        let Fixture { db, movie, rental } = setup(now - Duration::days(7)).await?;

        let returned = db.return_rental(dto(&rental, now)).await?;
        assert_eq!(returned.id, *rental.id().as_ref());
        assert_eq!(returned.date_returned, Some(now));
        assert_eq!(returned.rental_fee, Some(Decimal::from(14)));

        let mut con = db.transact().await?;
        let stored = db.rental_query().find_by_id(&mut con, rental.id()).await?;
        assert!(stored.is_some_and(|rental| rental.is_returned()));
        let stock = db
            .movie_query()
            .find_by_id(&mut con, movie.id())
            .await?
            .map(|movie| movie.number_in_stock().clone());
        assert_eq!(stock, Some(NumberInStock::new(11)));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_rental_is_not_found() -> error_stack::Result<(), KernelError> {
        let now = OffsetDateTime::now_utc();
        let Fixture { db, .. } = setup(now).await?;

        let dto = ReturnRentalDto {
            customer_id: Uuid::new_v4(),
            movie_id: Uuid::new_v4(),
            returned_at: now,
        };
        let error = db.return_rental(dto).await.unwrap_err();
        assert!(matches!(error.current_context(), KernelError::NotFound));
        Ok(())
    }

    #[tokio::test]
    async fn second_return_is_rejected_without_changes() -> error_stack::Result<(), KernelError> {
        let now = OffsetDateTime::now_utc();
        let Fixture { db, movie, rental } = setup(now - Duration::days(2)).await?;

        let first = db.return_rental(dto(&rental, now)).await?;
        let error = db
            .return_rental(dto(&rental, now + Duration::days(3)))
            .await
            .unwrap_err();
        assert!(matches!(
            error.current_context(),
            KernelError::AlreadyProcessed
        ));

        let mut con = db.transact().await?;
        let stored = db
            .rental_query()
            .find_by_id(&mut con, rental.id())
            .await?
            .expect("rental must still exist");
        let date_returned: Option<&OffsetDateTime> =
            stored.date_returned().as_ref().map(AsRef::as_ref);
        let fee: Option<&Decimal> = stored.rental_fee().as_ref().map(AsRef::as_ref);
        assert_eq!(date_returned, first.date_returned.as_ref());
        assert_eq!(fee, first.rental_fee.as_ref());

        let stock = db
            .movie_query()
            .find_by_id(&mut con, movie.id())
            .await?
            .map(|movie| movie.number_in_stock().clone());
        assert_eq!(stock, Some(NumberInStock::new(11)));
        Ok(())
    }

    #[tokio::test]
    async fn missing_movie_still_returns_rental() -> error_stack::Result<(), KernelError> {
        let now = OffsetDateTime::now_utc();
        let db = InMemoryDatabase::default();
        let rental = Rental::checkout(
            CustomerSnapshot::new(
                CustomerId::new(Uuid::new_v4()),
                CustomerName::new("Chris"),
                CustomerPhone::new("0900123456"),
            ),
            MovieSnapshot::new(
                MovieId::new(Uuid::new_v4()),
                MovieTitle::new("HelloMovie"),
                DailyRentalRate::new(2),
            ),
        );
        let mut con = db.transact().await?;
        db.rental_modifier().create(&mut con, &rental).await?;
        con.commit().await?;

        let returned = db.return_rental(dto(&rental, now)).await?;
        assert!(returned.date_returned.is_some());
        Ok(())
    }

    /// Delegates to the in-memory store but fails every restock.
    struct BrokenStockDatabase(InMemoryDatabase);

    struct BrokenStockModifier;

    #[async_trait::async_trait]
    impl DatabaseConnection for BrokenStockDatabase {
        type Transaction = InMemoryTransaction;
        async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
            self.0.transact().await
        }
    }

    impl DependOnRentalQuery for BrokenStockDatabase {
        type RentalQuery = InMemoryRentalRepository;
        fn rental_query(&self) -> &Self::RentalQuery {
            self.0.rental_query()
        }
    }

    impl DependOnRentalModifier for BrokenStockDatabase {
        type RentalModifier = InMemoryRentalRepository;
        fn rental_modifier(&self) -> &Self::RentalModifier {
            self.0.rental_modifier()
        }
    }

    impl DependOnMovieModifier for BrokenStockDatabase {
        type MovieModifier = BrokenStockModifier;
        fn movie_modifier(&self) -> &Self::MovieModifier {
            &BrokenStockModifier
        }
    }

    #[async_trait::async_trait]
    impl MovieModifier for BrokenStockModifier {
        type Transaction = InMemoryTransaction;

        async fn create(
            &self,
            con: &mut InMemoryTransaction,
            movie: &Movie,
        ) -> error_stack::Result<(), KernelError> {
            InMemoryMovieRepository.create(con, movie).await
        }

        async fn increment_stock(
            &self,
            _con: &mut InMemoryTransaction,
            _movie_id: &MovieId,
        ) -> error_stack::Result<bool, KernelError> {
            Err(Report::new(KernelError::Internal))
        }
    }

    #[tokio::test]
    async fn failed_restock_keeps_rental_open() -> error_stack::Result<(), KernelError> {
        let now = OffsetDateTime::now_utc();
        let Fixture { db, movie, rental } = setup(now - Duration::days(3)).await?;
        let broken = BrokenStockDatabase(db.clone());

        let error = broken.return_rental(dto(&rental, now)).await.unwrap_err();
        assert!(matches!(error.current_context(), KernelError::Internal));

        let mut con = db.transact().await?;
        let stored = db
            .rental_query()
            .find_by_id(&mut con, rental.id())
            .await?
            .expect("rental must still exist");
        assert!(!stored.is_returned());
        assert!(stored.rental_fee().is_none());

        let stock = db
            .movie_query()
            .find_by_id(&mut con, movie.id())
            .await?
            .map(|movie| movie.number_in_stock().clone());
        assert_eq!(stock, Some(NumberInStock::new(10)));
        Ok(())
    }
}

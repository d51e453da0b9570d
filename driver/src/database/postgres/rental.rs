use rust_decimal::Decimal;
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{
    CustomerId, CustomerName, CustomerPhone, CustomerSnapshot, DailyRentalRate, DateOut,
    DateReturned, MovieId, MovieSnapshot, MovieTitle, Rental, RentalFee, RentalId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresRentalRepository;

#[async_trait::async_trait]
impl RentalQuery for PostgresRentalRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_id(con, id).await
    }

    async fn find_latest(
        &self,
        con: &mut PostgresTransaction,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_latest(con, customer_id, movie_id).await
    }
}

#[async_trait::async_trait]
impl RentalModifier for PostgresRentalRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::create(con, rental).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::update(con, rental).await
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: Uuid,
    customer_id: Uuid,
    customer_name: String,
    customer_phone: String,
    movie_id: Uuid,
    movie_title: String,
    movie_daily_rental_rate: Decimal,
    date_out: OffsetDateTime,
    date_returned: Option<OffsetDateTime>,
    rental_fee: Option<Decimal>,
}

impl From<RentalRow> for Rental {
    fn from(value: RentalRow) -> Self {
        Rental::new(
            RentalId::new(value.id),
            CustomerSnapshot::new(
                CustomerId::new(value.customer_id),
                CustomerName::new(value.customer_name),
                CustomerPhone::new(value.customer_phone),
            ),
            MovieSnapshot::new(
                MovieId::new(value.movie_id),
                MovieTitle::new(value.movie_title),
                DailyRentalRate::new(value.movie_daily_rental_rate),
            ),
            DateOut::new(value.date_out),
            value.date_returned.map(DateReturned::new),
            value.rental_fee.map(RentalFee::new),
        )
    }
}

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT
                id,
                customer_id, customer_name, customer_phone,
                movie_id, movie_title, movie_daily_rental_rate,
                date_out, date_returned, rental_fee
            FROM
                rentals
            WHERE
                id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Rental::from))
    }

    async fn find_latest(
        con: &mut PgConnection,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT
                id,
                customer_id, customer_name, customer_phone,
                movie_id, movie_title, movie_daily_rental_rate,
                date_out, date_returned, rental_fee
            FROM
                rentals
            WHERE
                customer_id = $1 AND movie_id = $2
            ORDER BY
                date_returned IS NULL DESC, date_out DESC
            LIMIT 1
            "#,
        )
        .bind(customer_id.as_ref())
        .bind(movie_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Rental::from))
    }

    async fn create(con: &mut PgConnection, rental: &Rental) -> error_stack::Result<(), KernelError> {
        let customer = rental.customer();
        let movie = rental.movie();
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO rentals (
                id,
                customer_id, customer_name, customer_phone,
                movie_id, movie_title, movie_daily_rental_rate,
                date_out, date_returned, rental_fee
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(customer.id().as_ref())
        .bind(customer.name().as_ref())
        .bind(customer.phone().as_ref())
        .bind(movie.id().as_ref())
        .bind(movie.title().as_ref())
        .bind(movie.daily_rental_rate().as_ref())
        .bind(rental.date_out().as_ref())
        .bind(
            rental
                .date_returned()
                .as_ref()
                .map(AsRef::<OffsetDateTime>::as_ref),
        )
        .bind(rental.rental_fee().as_ref().map(AsRef::<Decimal>::as_ref))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, rental: &Rental) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            UPDATE rentals
            SET date_returned = $2, rental_fee = $3
            WHERE id = $1
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(
            rental
                .date_returned()
                .as_ref()
                .map(AsRef::<OffsetDateTime>::as_ref),
        )
        .bind(rental.rental_fee().as_ref().map(AsRef::<Decimal>::as_ref))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::RentalQuery;
    use kernel::interface::update::RentalModifier;
    use kernel::prelude::entity::{
        CustomerId, CustomerName, CustomerPhone, CustomerSnapshot, DailyRentalRate, DateOut,
        MovieId, MovieSnapshot, MovieTitle, Rental, RentalFee, RentalId,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresDatabase, PostgresRentalRepository};

    // timestamptz keeps microseconds only
    fn now() -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        now - Duration::nanoseconds(i64::from(now.nanosecond() % 1_000))
    }

    fn rental(customer_id: &CustomerId, movie_id: &MovieId, date_out: OffsetDateTime) -> Rental {
        Rental::new(
            RentalId::new(Uuid::new_v4()),
            CustomerSnapshot::new(
                customer_id.clone(),
                CustomerName::new("Chris"),
                CustomerPhone::new("0900123456"),
            ),
            MovieSnapshot::new(
                movie_id.clone(),
                MovieTitle::new("HelloMovie"),
                DailyRentalRate::new(2),
            ),
            DateOut::new(date_out),
            None,
            None,
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;

        let customer_id = CustomerId::new(Uuid::new_v4());
        let movie_id = MovieId::new(Uuid::new_v4());
        let mut rental = rental(&customer_id, &movie_id, now() - Duration::days(7));
        PostgresRentalRepository.create(&mut con, &rental).await?;

        let found = PostgresRentalRepository
            .find_by_id(&mut con, rental.id())
            .await?;
        assert_eq!(found, Some(rental.clone()));

        rental.mark_returned(now());
        PostgresRentalRepository.update(&mut con, &rental).await?;

        let found = PostgresRentalRepository
            .find_by_id(&mut con, rental.id())
            .await?;
        assert_eq!(found, Some(rental.clone()));
        assert_eq!(
            found.and_then(|rental| rental.rental_fee().clone()),
            Some(RentalFee::new(Decimal::from(14)))
        );
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn find_latest_prefers_open_rental() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;

        let customer_id = CustomerId::new(Uuid::new_v4());
        let movie_id = MovieId::new(Uuid::new_v4());
        let open = rental(&customer_id, &movie_id, now() - Duration::days(3));
        let mut returned = rental(&customer_id, &movie_id, now() - Duration::days(1));
        returned.mark_returned(now());
        PostgresRentalRepository.create(&mut con, &open).await?;
        PostgresRentalRepository.create(&mut con, &returned).await?;

        let found = PostgresRentalRepository
            .find_latest(&mut con, &customer_id, &movie_id)
            .await?;
        assert_eq!(found, Some(open));

        let found = PostgresRentalRepository
            .find_latest(&mut con, &customer_id, &MovieId::new(Uuid::new_v4()))
            .await?;
        assert!(found.is_none());
        Ok(())
    }
}

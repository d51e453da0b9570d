use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::MovieQuery;
use kernel::interface::update::MovieModifier;
use kernel::prelude::entity::{DailyRentalRate, Movie, MovieId, MovieTitle, NumberInStock};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresMovieRepository;

#[async_trait::async_trait]
impl MovieQuery for PostgresMovieRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        PgMovieInternal::find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl MovieModifier for PostgresMovieRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError> {
        PgMovieInternal::create(con, movie).await
    }

    async fn increment_stock(
        &self,
        con: &mut PostgresTransaction,
        movie_id: &MovieId,
    ) -> error_stack::Result<bool, KernelError> {
        PgMovieInternal::increment_stock(con, movie_id).await
    }
}

#[derive(sqlx::FromRow)]
struct MovieRow {
    id: Uuid,
    title: String,
    daily_rental_rate: Decimal,
    number_in_stock: i32,
}

impl From<MovieRow> for Movie {
    fn from(value: MovieRow) -> Self {
        Movie::new(
            MovieId::new(value.id),
            MovieTitle::new(value.title),
            DailyRentalRate::new(value.daily_rental_rate),
            NumberInStock::new(value.number_in_stock),
        )
    }
}

pub(in crate::database) struct PgMovieInternal;

impl PgMovieInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        let row = sqlx::query_as::<_, MovieRow>(
            // language=postgresql
            r#"
            SELECT id, title, daily_rental_rate, number_in_stock
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Movie::from))
    }

    async fn create(con: &mut PgConnection, movie: &Movie) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO movies (id, title, daily_rental_rate, number_in_stock)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(movie.id().as_ref())
        .bind(movie.title().as_ref())
        .bind(movie.daily_rental_rate().as_ref())
        .bind(movie.number_in_stock().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn increment_stock(
        con: &mut PgConnection,
        movie_id: &MovieId,
    ) -> error_stack::Result<bool, KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET number_in_stock = number_in_stock + 1
            WHERE id = $1
            "#,
        )
        .bind(movie_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() > 0)
    }
}

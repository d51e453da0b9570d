use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{
    DestructCustomerSnapshot, DestructMovieSnapshot, DestructRental, Rental,
};

#[derive(Debug, Clone)]
pub struct CustomerSnapshotDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone)]
pub struct MovieSnapshotDto {
    pub id: Uuid,
    pub title: String,
    pub daily_rental_rate: Decimal,
}

#[derive(Debug, Clone)]
pub struct RentalDto {
    pub id: Uuid,
    pub customer: CustomerSnapshotDto,
    pub movie: MovieSnapshotDto,
    pub date_out: OffsetDateTime,
    pub date_returned: Option<OffsetDateTime>,
    pub rental_fee: Option<Decimal>,
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let DestructRental {
            id,
            customer,
            movie,
            date_out,
            date_returned,
            rental_fee,
        } = value.into_destruct();
        let DestructCustomerSnapshot { id: customer_id, name, phone } = customer.into_destruct();
        let DestructMovieSnapshot {
            id: movie_id,
            title,
            daily_rental_rate,
        } = movie.into_destruct();
        Self {
            id: id.into(),
            customer: CustomerSnapshotDto {
                id: customer_id.into(),
                name: name.into(),
                phone: phone.into(),
            },
            movie: MovieSnapshotDto {
                id: movie_id.into(),
                title: title.into(),
                daily_rental_rate: daily_rental_rate.into(),
            },
            date_out: date_out.into(),
            date_returned: date_returned.map(Into::into),
            rental_fee: rental_fee.map(Into::into),
        }
    }
}

pub struct ReturnRentalDto {
    pub customer_id: Uuid,
    pub movie_id: Uuid,
    pub returned_at: OffsetDateTime,
}

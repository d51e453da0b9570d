use crate::controller::Exhaust;
use application::transfer::{CustomerSnapshotDto, MovieSnapshotDto, RentalDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    id: Uuid,
    name: String,
    phone: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    id: Uuid,
    title: String,
    daily_rental_rate: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalResponse {
    id: Uuid,
    customer: CustomerResponse,
    movie: MovieResponse,
    #[serde(with = "time::serde::rfc3339")]
    date_out: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    date_returned: Option<OffsetDateTime>,
    rental_fee: Option<Decimal>,
}

impl IntoResponse for RentalResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<RentalDto> for Presenter {
    type To = RentalResponse;
    fn emit(&self, input: RentalDto) -> Self::To {
        let RentalDto {
            id,
            customer: CustomerSnapshotDto { id: customer_id, name, phone },
            movie:
                MovieSnapshotDto {
                    id: movie_id,
                    title,
                    daily_rental_rate,
                },
            date_out,
            date_returned,
            rental_fee,
        } = input;
        RentalResponse {
            id,
            customer: CustomerResponse {
                id: customer_id,
                name,
                phone,
            },
            movie: MovieResponse {
                id: movie_id,
                title,
                daily_rental_rate,
            },
            date_out,
            date_returned,
            rental_fee,
        }
    }
}

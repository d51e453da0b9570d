use crate::controller::TryIntake;
use application::transfer::ReturnRentalDto;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use error_stack::{Report, ResultExt};
use kernel::KernelError;
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    customer_id: Option<String>,
    movie_id: Option<String>,
}

pub struct Transformer;

impl TryIntake<Result<Json<ReturnRequest>, JsonRejection>> for Transformer {
    type To = ReturnRentalDto;
    type Error = Report<KernelError>;
    fn emit(
        &self,
        input: Result<Json<ReturnRequest>, JsonRejection>,
    ) -> Result<Self::To, Self::Error> {
        let Json(ReturnRequest {
            customer_id,
            movie_id,
        }) = input.map_err(|rejection| {
            Report::new(KernelError::Validation).attach_printable(rejection.body_text())
        })?;
        Ok(ReturnRentalDto {
            customer_id: parse_id("customerId", customer_id)?,
            movie_id: parse_id("movieId", movie_id)?,
            returned_at: OffsetDateTime::now_utc(),
        })
    }
}

fn parse_id(field: &str, value: Option<String>) -> error_stack::Result<Uuid, KernelError> {
    let value = value.ok_or_else(|| {
        Report::new(KernelError::Validation).attach_printable(format!("\"{field}\" is required"))
    })?;
    Uuid::parse_str(&value)
        .change_context_lazy(|| KernelError::Validation)
        .attach_printable_lazy(|| format!("\"{field}\" must be a valid id"))
}

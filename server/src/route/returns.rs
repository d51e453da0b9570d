mod request;
mod response;

use crate::auth::Authenticated;
use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::returns::request::{ReturnRequest, Transformer};
use crate::route::returns::response::{Presenter, RentalResponse};
use application::service::ReturnRentalService;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

pub trait ReturnRouter {
    fn route_returns(self) -> Self;
}

impl<D> ReturnRouter for Router<AppModule<D>>
where
    D: ReturnRentalService,
{
    fn route_returns(self) -> Self {
        self.route(
            "/api/returns",
            post(
                |Authenticated(claims): Authenticated,
                 State(handler): State<AppModule<D>>,
                 req: Result<Json<ReturnRequest>, JsonRejection>| async move {
                    tracing::debug!(user = %claims.sub, "Return requested");
                    return_rental(handler, req).await
                },
            ),
        )
    }
}

async fn return_rental<D: ReturnRentalService>(
    handler: AppModule<D>,
    req: Result<Json<ReturnRequest>, JsonRejection>,
) -> Result<RentalResponse, ErrorStatus> {
    Controller::new(Transformer, Presenter)
        .try_intake(req)?
        .handle(|dto| async move { handler.database().return_rental(dto).await })
        .await
        .map_err(ErrorStatus::from)
}

mod date_out;
mod date_returned;
mod fee;
mod id;
mod snapshot;

pub use self::{date_out::*, date_returned::*, fee::*, id::*, snapshot::*};
use destructure::Destructure;
use time::OffsetDateTime;
use uuid::Uuid;
use vodca::References;

/// One checkout of a movie by a customer.
///
/// `date_returned` and `rental_fee` stay `None` until [`Rental::mark_returned`] runs.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Rental {
    id: RentalId,
    customer: CustomerSnapshot,
    movie: MovieSnapshot,
    date_out: DateOut,
    date_returned: Option<DateReturned>,
    rental_fee: Option<RentalFee>,
}

impl Rental {
    pub fn new(
        id: RentalId,
        customer: CustomerSnapshot,
        movie: MovieSnapshot,
        date_out: DateOut,
        date_returned: Option<DateReturned>,
        rental_fee: Option<RentalFee>,
    ) -> Self {
        Self {
            id,
            customer,
            movie,
            date_out,
            date_returned,
            rental_fee,
        }
    }

    pub fn checkout(customer: CustomerSnapshot, movie: MovieSnapshot) -> Self {
        Self::new(
            RentalId::new(Uuid::new_v4()),
            customer,
            movie,
            DateOut::now(),
            None,
            None,
        )
    }

    pub fn is_returned(&self) -> bool {
        self.date_returned.is_some()
    }

    /// Closes the rental at `at` and charges every started day since checkout.
    ///
    /// Callers must check [`Rental::is_returned`] first.
    pub fn mark_returned(&mut self, at: impl Into<OffsetDateTime>) {
        let returned = DateReturned::new(at);
        let fee = RentalFee::calculate(self.movie.daily_rental_rate(), &self.date_out, &returned);
        self.date_returned = Some(returned);
        self.rental_fee = Some(fee);
    }
}

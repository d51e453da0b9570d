use destructure::Destructure;
use vodca::References;

use crate::entity::{
    CustomerId, CustomerName, CustomerPhone, DailyRentalRate, Movie, MovieId, MovieTitle,
};

/// Customer data copied into a rental at checkout.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct CustomerSnapshot {
    id: CustomerId,
    name: CustomerName,
    phone: CustomerPhone,
}

impl CustomerSnapshot {
    pub fn new(id: CustomerId, name: CustomerName, phone: CustomerPhone) -> Self {
        Self { id, name, phone }
    }
}

/// Movie data copied into a rental at checkout.
/// Later price or title changes of the movie do not reach it.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct MovieSnapshot {
    id: MovieId,
    title: MovieTitle,
    daily_rental_rate: DailyRentalRate,
}

impl MovieSnapshot {
    pub fn new(id: MovieId, title: MovieTitle, daily_rental_rate: DailyRentalRate) -> Self {
        Self {
            id,
            title,
            daily_rental_rate,
        }
    }
}

impl From<&Movie> for MovieSnapshot {
    fn from(movie: &Movie) -> Self {
        Self::new(
            movie.id().clone(),
            movie.title().clone(),
            movie.daily_rental_rate().clone(),
        )
    }
}

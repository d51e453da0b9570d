mod id;
mod rate;
mod stock;
mod title;

pub use self::{id::*, rate::*, stock::*, title::*};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Movie {
    id: MovieId,
    title: MovieTitle,
    daily_rental_rate: DailyRentalRate,
    number_in_stock: NumberInStock,
}

impl Movie {
    pub fn new(
        id: MovieId,
        title: MovieTitle,
        daily_rental_rate: DailyRentalRate,
        number_in_stock: NumberInStock,
    ) -> Self {
        Self {
            id,
            title,
            daily_rental_rate,
            number_in_stock,
        }
    }

    /// Puts one returned copy back on the shelf.
    pub fn restock(&mut self) {
        self.number_in_stock = self.number_in_stock.incremented();
    }
}

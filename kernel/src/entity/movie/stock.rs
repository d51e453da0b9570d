use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct NumberInStock(i32);

impl NumberInStock {
    pub fn new(amount: impl Into<i32>) -> Self {
        Self(amount.into())
    }

    pub fn incremented(&self) -> Self {
        Self(self.0 + 1)
    }
}

mod id;
mod name;
mod phone;

pub use self::{id::*, name::*, phone::*};

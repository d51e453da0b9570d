mod returns;

pub use self::returns::*;

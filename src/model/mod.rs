mod account;
mod validation;

pub use account::*;
pub use validation::*;

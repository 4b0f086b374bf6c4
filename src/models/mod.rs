pub mod driver;
pub mod user;

pub use driver::{CreateDriver, Driver, UpdateDriver};
pub use user::{CreateUser, UpdateUser, User};

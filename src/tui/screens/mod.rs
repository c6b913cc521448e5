//! Screen rendering and input handling.

mod detail;
mod form;
mod home;

pub use detail::DetailScreen;
pub use home::HomeScreen;

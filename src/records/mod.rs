//! Typed records, one per exercise. Field sets are fixed.

mod country;
mod film;
mod team;

pub use country::CountryRecord;
pub use film::{FilmRecord, FilmYear};
pub use team::TeamRecord;

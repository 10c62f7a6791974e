pub mod configs;
pub mod errors;
pub mod fairings;
pub mod guards;
pub mod list;
pub mod lists;
pub mod question;
pub mod tag;

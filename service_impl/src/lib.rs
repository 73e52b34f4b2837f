pub mod activity;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod macros;
pub mod spreadsheet;
pub mod statistics;
pub mod user;

#[cfg(test)]
mod test;

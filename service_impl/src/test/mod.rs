#[cfg(test)]
pub mod statistics;

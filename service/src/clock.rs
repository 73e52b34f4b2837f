use mockall::automock;

/// Source of the current date.
///
/// Partial periods end at this date, so tests inject a fixed day here.
#[automock]
pub trait ClockService {
    fn today(&self) -> time::Date;
}

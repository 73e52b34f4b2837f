use service::clock::ClockService;
use time::OffsetDateTime;

/// Today in UTC. Callers normalize time zones before asking for data.
pub struct ClockServiceImpl;
impl ClockService for ClockServiceImpl {
    fn today(&self) -> time::Date {
        OffsetDateTime::now_utc().date()
    }
}

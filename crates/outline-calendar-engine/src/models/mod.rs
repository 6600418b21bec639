pub mod event;
pub mod schema;

pub use event::{
    Completion, DATE_FORMAT, DayOfWeek, EventRecord, EventTiming, LocatedEvent, TIME_FORMAT, keys,
};
pub use schema::{ValidationError, parse_date, parse_time};

//! Provenance records: creators, creation date and modification dates.
//!
//! Every container here validates on write. Dates must follow the W3CDTF
//! profile of ISO 8601 (`2020-01-01T00:00:00+0000`), creator fields must be
//! strings, and only the declared field names can be read or written.

mod creator;
mod date;
mod list;
mod record;

pub use creator::{Creator, CreatorField};
pub use date::{DATE_FORMAT, DateStamp, validate_date};
pub use list::{ListOfCreators, ModifiedHistory, RestrictedList};
pub use record::{History, HistoryField};

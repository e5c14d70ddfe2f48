pub mod call_record;
pub mod link;
pub mod recording;

pub use call_record::{CallDirection, CallRecord};
pub use link::Link;
pub use recording::Recording;

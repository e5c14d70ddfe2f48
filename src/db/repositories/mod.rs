mod call_records;
mod links;
mod recordings;

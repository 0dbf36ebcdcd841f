pub mod bulk_lookup;

pub use bulk_lookup::{BulkLookupUseCase, Collector, DispatchReport, Dispatcher, LookupTask, TaskSet};

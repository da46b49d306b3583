mod attempt_counter;
mod lookup_handle;
mod reverse_lookup;

pub use attempt_counter::{AttemptCounter, AttemptOutcome};
pub use lookup_handle::LookupHandle;
pub use reverse_lookup::{default_concurrency, ReverseLookupBuilder, ReverseLookupService};

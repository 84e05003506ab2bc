//! Attendance bookkeeping core.
//!
//! Each function is one synchronous unit of work from the caller's point of view:
//! validate input, then make a single call (or a short sequence of reads) against
//! the [`HrmStore`](crate::store::HrmStore). Nothing is cached between calls, so
//! every aggregate reflects the store at the instant it is read.

pub mod aggregation;
pub mod directory;
pub mod filter;
pub mod ledger;

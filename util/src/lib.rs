//! Role Equivalence Toolkit - Shared Utility Code
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fmt;
pub mod slot_alloc;
pub mod touched_list;

pub use slot_alloc::SlotAlloc;
pub use touched_list::TouchedList;

//! Wire-facing data structures for the printing bridge.

pub mod tickets;

pub use tickets::{PrintOutcome, PrinterInfo, PrintersResponse, PrintingStatus, TicketData};

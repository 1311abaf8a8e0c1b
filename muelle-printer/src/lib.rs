//! # muelle-printer
//!
//! Low-level printer access for the ticket terminal - HOW to print only.
//!
//! ## Scope
//!
//! - Printer enumeration and default-printer lookup (winspool)
//! - Printer name resolution (explicit name -> default -> first available)
//! - Spool dispatch: temp BMP file handed to the OS shell "print" verb
//!
//! Business logic (WHAT to print) stays in application code:
//! - Ticket rendering -> embarcadero
//!
//! Windows is the only platform with a real backend; other targets can use
//! [`SpoolBitmap`] but have no dispatch path, and callers are expected to
//! fail closed (the application maps this to a structured error).

mod bitmap;
mod error;
#[cfg(windows)]
mod printer;

// Re-exports
pub use bitmap::SpoolBitmap;
pub use error::{PrintError, PrintResult};

#[cfg(windows)]
pub use printer::{SpoolPrinter, print_bitmap};

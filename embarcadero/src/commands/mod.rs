pub mod api;
pub mod printer;

pub use api::say_hello;
pub use printer::{check_printing_status, get_printers, print_ticket, test_printer};

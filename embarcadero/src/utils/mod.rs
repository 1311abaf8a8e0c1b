//! Utility module for rendering and printing helpers.

pub mod layout;
pub mod printing;
pub mod qr;
pub mod ticket_renderer;

//! Printing capability, probed once at startup
//!
//! The probe result is an explicit value handed by reference into every
//! bridge call rather than a process-wide flag. It is established once and
//! never re-evaluated: all printing operations short-circuit uniformly
//! while it is unavailable.

use crate::utils::layout::FontSet;
use tracing::warn;

pub const UNAVAILABLE_ERROR: &str = "Módulos de impresión no disponibles";

const READY_MESSAGE: &str = "Sistema de impresión listo";

/// Outcome of the one-time startup probe of the rendering prerequisites.
pub struct PrintCapability {
    fonts: Option<FontSet>,
    message: String,
}

impl PrintCapability {
    /// Probe the system once: the ticket template needs the system font
    /// set; without it nothing can be rendered and every printing call
    /// fails closed.
    pub fn detect() -> Self {
        match FontSet::load_system() {
            Ok(fonts) => Self {
                fonts: Some(fonts),
                message: READY_MESSAGE.to_string(),
            },
            Err(e) => {
                warn!(error = %e, "printing capability unavailable");
                Self::unavailable(format!(
                    "Fuentes del sistema no disponibles: {e}. Instale Arial (Windows) o DejaVu Sans"
                ))
            }
        }
    }

    /// A capability that fails every printing call with `message`.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            fonts: None,
            message: message.into(),
        }
    }

    pub fn available(&self) -> bool {
        self.fonts.is_some()
    }

    pub fn fonts(&self) -> Option<&FontSet> {
        self.fonts.as_ref()
    }

    /// Human-readable startup status line.
    pub fn message(&self) -> &str {
        &self.message
    }
}

//! Printer module - delegates to muelle-printer
//!
//! High-level printing API for the bridge layer, with the platform split
//! kept here so commands stay platform-agnostic. Only Windows has a real
//! spooler backend; everywhere else the operations fail closed.

use image::RgbImage;
use tracing::instrument;

#[cfg(target_os = "windows")]
mod platform {
    use image::RgbImage;
    use muelle_printer::SpoolPrinter;
    use tracing::{error, info};

    pub fn list_printers() -> Result<Vec<String>, String> {
        SpoolPrinter::list().map_err(|e| e.to_string())
    }

    pub fn default_printer() -> Result<Option<String>, String> {
        SpoolPrinter::default_printer().map_err(|e| e.to_string())
    }

    pub fn resolve_printer(printer_name: Option<String>) -> Result<String, String> {
        SpoolPrinter::resolve(printer_name.as_deref()).map_err(|e| {
            error!(error = %e, "resolve_printer failed");
            e.to_string()
        })
    }

    pub fn print_ticket_image(
        image: &RgbImage,
        printer_name: Option<String>,
    ) -> Result<String, String> {
        let name = resolve_printer(printer_name)?;
        info!(printer = name, "printing ticket bitmap");

        muelle_printer::print_bitmap(image, &name).map_err(|e| e.to_string())?;
        Ok(name)
    }
}

#[cfg(not(target_os = "windows"))]
mod platform {
    use image::RgbImage;

    pub fn list_printers() -> Result<Vec<String>, String> {
        Ok(Vec::new())
    }

    pub fn default_printer() -> Result<Option<String>, String> {
        Ok(None)
    }

    pub fn resolve_printer(printer_name: Option<String>) -> Result<String, String> {
        if let Some(name) = printer_name {
            Ok(name)
        } else {
            Err("PRINTING_NOT_SUPPORTED".to_string())
        }
    }

    pub fn print_ticket_image(
        _image: &RgbImage,
        _printer_name: Option<String>,
    ) -> Result<String, String> {
        Err("PRINTING_NOT_SUPPORTED".to_string())
    }
}

#[instrument]
pub fn list_printers() -> Result<Vec<String>, String> {
    platform::list_printers()
}

#[instrument]
pub fn default_printer() -> Result<Option<String>, String> {
    platform::default_printer()
}

#[instrument(skip(printer_name))]
pub fn resolve_printer(printer_name: Option<String>) -> Result<String, String> {
    platform::resolve_printer(printer_name)
}

/// Spool the rendered ticket to `printer_name` (or the OS default).
/// Returns the resolved printer name on success.
#[instrument(skip(image, printer_name))]
pub fn print_ticket_image(
    image: &RgbImage,
    printer_name: Option<String>,
) -> Result<String, String> {
    platform::print_ticket_image(image, printer_name)
}

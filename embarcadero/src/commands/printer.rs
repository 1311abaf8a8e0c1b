//! Printing bridge calls
//!
//! Request/response surface exposed to the hosted UI: printer enumeration,
//! ticket printing, test print and subsystem status. Every failure is
//! converted to the structured error shape at this boundary; nothing
//! propagates to the bridge layer as a panic or a raw error.

use crate::api::{PrintOutcome, PrinterInfo, PrintersResponse, PrintingStatus, TicketData};
use crate::core::capability::{PrintCapability, UNAVAILABLE_ERROR};
use crate::utils::printing;
use crate::utils::ticket_renderer::TicketRenderer;
use chrono::Local;
use tracing::{info, instrument};

/// Enumerate installed printers and report the OS default.
#[instrument(skip(cap))]
pub fn get_printers(cap: &PrintCapability) -> PrintersResponse {
    if !cap.available() {
        return PrintersResponse::error(UNAVAILABLE_ERROR);
    }

    let printers = match printing::list_printers() {
        Ok(names) => names.into_iter().map(PrinterInfo::available).collect(),
        Err(e) => {
            return PrintersResponse::error(format!("Error obteniendo impresoras: {}", e));
        }
    };

    let default = match printing::default_printer() {
        Ok(name) => name.unwrap_or_default(),
        Err(e) => {
            return PrintersResponse::error(format!("Error obteniendo impresoras: {}", e));
        }
    };

    PrintersResponse::available(printers, default)
}

/// Render `ticket` and hand it to the spooler.
///
/// Success means the job was accepted by the OS print handler; physical
/// completion is not observable through the shell handoff.
#[instrument(skip(cap, ticket, printer_name), fields(codigo = ticket.codigo()))]
pub fn print_ticket(
    cap: &PrintCapability,
    ticket: &TicketData,
    printer_name: Option<String>,
) -> PrintOutcome {
    let Some(fonts) = cap.fonts() else {
        return PrintOutcome::failure(UNAVAILABLE_ERROR);
    };

    let image = TicketRenderer::new(fonts, ticket).render();

    match printing::print_ticket_image(&image, printer_name) {
        Ok(printer) => {
            info!(printer, "ticket submitted");
            PrintOutcome::sent(printer)
        }
        Err(e) => PrintOutcome::failure(format!("Error imprimiendo ticket: {}", e)),
    }
}

/// Print a fixed synthetic ticket to verify the device end to end.
#[instrument(skip(cap, printer_name))]
pub fn test_printer(cap: &PrintCapability, printer_name: Option<String>) -> PrintOutcome {
    if !cap.available() {
        return PrintOutcome::failure(UNAVAILABLE_ERROR);
    }

    let ticket = test_ticket();
    match print_ticket(cap, &ticket, printer_name) {
        outcome @ PrintOutcome::Success { .. } => outcome,
        PrintOutcome::Failure { error, .. } => {
            PrintOutcome::failure(format!("Error en prueba: {}", error))
        }
    }
}

/// Report whether the printing subsystem came up at process start.
pub fn check_printing_status(cap: &PrintCapability) -> PrintingStatus {
    PrintingStatus {
        available: cap.available(),
        modules_loaded: cap.available(),
        message: cap.message().to_string(),
    }
}

fn test_ticket() -> TicketData {
    let now = Local::now();
    TicketData {
        codigo: Some(format!("TEST-{}", now.format("%Y%m%d%H%M%S"))),
        nombre: Some("PRUEBA DE IMPRESIÓN".to_string()),
        documento: Some("00000000".to_string()),
        fecha: Some(now.format("%d/%m/%Y").to_string()),
        hora: Some(now.format("%H:%M").to_string()),
        embarcacion: Some("Lancha de Prueba".to_string()),
        adultos: 1,
        ninos: 0,
        total: Some("$0".to_string()),
        generate_qr: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_ticket_short_circuits_without_capability() {
        let cap = PrintCapability::unavailable("fonts missing");
        let outcome = print_ticket(&cap, &TicketData::default(), None);
        match outcome {
            PrintOutcome::Failure { success, error } => {
                assert!(!success);
                assert_eq!(error, UNAVAILABLE_ERROR);
            }
            PrintOutcome::Success { .. } => panic!("must not print without capability"),
        }
    }

    #[test]
    fn get_printers_short_circuits_without_capability() {
        let cap = PrintCapability::unavailable("fonts missing");
        match get_printers(&cap) {
            PrintersResponse::Error { error } => assert_eq!(error, UNAVAILABLE_ERROR),
            PrintersResponse::Available { .. } => panic!("must not enumerate"),
        }
    }

    #[test]
    fn status_mirrors_capability() {
        let cap = PrintCapability::unavailable("sin fuentes");
        let status = check_printing_status(&cap);
        assert!(!status.available);
        assert!(!status.modules_loaded);
        assert_eq!(status.message, "sin fuentes");
    }

    #[test]
    fn test_ticket_matches_template() {
        let ticket = test_ticket();
        assert!(ticket.codigo().starts_with("TEST-"));
        assert_eq!(ticket.nombre(), "PRUEBA DE IMPRESIÓN");
        assert_eq!(ticket.documento(), "00000000");
        assert_eq!(ticket.adultos, 1);
        assert_eq!(ticket.ninos, 0);
        assert_eq!(ticket.total(), "$0");
        assert!(ticket.generate_qr);
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn print_fails_closed_on_unsupported_platform() {
        let cap = PrintCapability::detect();
        if !cap.available() {
            return;
        }
        let outcome = print_ticket(&cap, &TicketData::default(), None);
        match outcome {
            PrintOutcome::Failure { error, .. } => {
                assert!(error.contains("PRINTING_NOT_SUPPORTED"));
            }
            PrintOutcome::Success { .. } => panic!("no spooler exists here"),
        }
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn get_printers_reports_empty_list_when_available() {
        let cap = PrintCapability::detect();
        if !cap.available() {
            return;
        }
        match get_printers(&cap) {
            PrintersResponse::Available {
                printers,
                default,
                available,
            } => {
                assert!(printers.is_empty());
                assert!(default.is_empty());
                assert!(available);
            }
            PrintersResponse::Error { error } => panic!("unexpected error: {}", error),
        }
    }
}

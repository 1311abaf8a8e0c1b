//! Ticket payload and bridge response shapes
//!
//! Field names stay in Spanish because they are the wire contract with the
//! hosted UI. Every ticket field is optional; absent values render as the
//! literal "N/A" placeholder rather than failing the print.

use serde::{Deserialize, Serialize};

fn default_generate_qr() -> bool {
    true
}

/// One passenger-ferry ticket, as submitted by the UI per print request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketData {
    #[serde(default)]
    pub codigo: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub documento: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    /// Travel date, already formatted by the caller (dd/mm/yyyy).
    #[serde(default)]
    pub fecha: Option<String>,
    /// Departure time, already formatted by the caller.
    #[serde(default)]
    pub hora: Option<String>,
    #[serde(default)]
    pub embarcacion: Option<String>,
    #[serde(default)]
    pub adultos: u32,
    #[serde(default)]
    pub ninos: u32,
    /// Pre-formatted currency string, e.g. "$50000".
    #[serde(default)]
    pub total: Option<String>,
    #[serde(rename = "generateQR", default = "default_generate_qr")]
    pub generate_qr: bool,
}

const PLACEHOLDER: &str = "N/A";

impl TicketData {
    pub fn codigo(&self) -> &str {
        self.codigo.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn nombre(&self) -> &str {
        self.nombre.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn documento(&self) -> &str {
        self.documento.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn fecha(&self) -> &str {
        self.fecha.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn hora(&self) -> &str {
        self.hora.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn embarcacion(&self) -> &str {
        self.embarcacion.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn total(&self) -> &str {
        self.total.as_deref().unwrap_or("$0")
    }

    /// Passenger-count row value: "2 adultos" or "2 adultos, 1 niños".
    pub fn passenger_summary(&self) -> String {
        if self.ninos > 0 {
            format!("{} adultos, {} niños", self.adultos, self.ninos)
        } else {
            format!("{} adultos", self.adultos)
        }
    }
}

/// One installed printer as reported to the UI.
///
/// The status field is a constant availability label, not a live probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterInfo {
    pub name: String,
    pub status: String,
}

impl PrinterInfo {
    pub fn available(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "Disponible".to_string(),
        }
    }
}

/// Response shape of the `get_printers` bridge call.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PrintersResponse {
    Available {
        printers: Vec<PrinterInfo>,
        default: String,
        available: bool,
    },
    Error {
        error: String,
    },
}

impl PrintersResponse {
    pub fn available(printers: Vec<PrinterInfo>, default: String) -> Self {
        Self::Available {
            printers,
            default,
            available: true,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self::Error {
            error: error.into(),
        }
    }
}

/// Outcome of a print or test-print bridge call. No partial-success state.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PrintOutcome {
    Success {
        success: bool,
        message: String,
        printer: String,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl PrintOutcome {
    /// The message reports submission to the spooler, not physical
    /// completion - the shell handoff is fire-and-forget.
    pub fn sent(printer: impl Into<String>) -> Self {
        let printer = printer.into();
        Self::Success {
            success: true,
            message: format!("Ticket impreso en {}", printer),
            printer,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            success: false,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Response shape of the `check_printing_status` bridge call.
#[derive(Debug, Clone, Serialize)]
pub struct PrintingStatus {
    pub available: bool,
    #[serde(rename = "modulesLoaded")]
    pub modules_loaded: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_defaults_from_empty_json() {
        let ticket: TicketData = serde_json::from_str("{}").unwrap();
        assert_eq!(ticket.codigo(), "N/A");
        assert_eq!(ticket.nombre(), "N/A");
        assert_eq!(ticket.adultos, 0);
        assert_eq!(ticket.ninos, 0);
        assert_eq!(ticket.total(), "$0");
        assert!(ticket.generate_qr);
    }

    #[test]
    fn ticket_parses_spanish_field_names() {
        let ticket: TicketData = serde_json::from_str(
            r#"{"codigo":"A1","nombre":"Juan Perez","adultos":2,"ninos":1,"generateQR":false}"#,
        )
        .unwrap();
        assert_eq!(ticket.codigo(), "A1");
        assert_eq!(ticket.nombre(), "Juan Perez");
        assert!(!ticket.generate_qr);
    }

    #[test]
    fn passenger_summary_includes_children_only_when_nonzero() {
        let mut ticket = TicketData {
            adultos: 2,
            ninos: 1,
            ..Default::default()
        };
        assert_eq!(ticket.passenger_summary(), "2 adultos, 1 niños");

        ticket.ninos = 0;
        assert_eq!(ticket.passenger_summary(), "2 adultos");
    }

    #[test]
    fn print_outcome_serializes_to_bridge_shapes() {
        let ok = serde_json::to_value(PrintOutcome::sent("EPSON TM-T20")).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["printer"], "EPSON TM-T20");
        assert_eq!(ok["message"], "Ticket impreso en EPSON TM-T20");

        let err = serde_json::to_value(PrintOutcome::failure("sin papel")).unwrap();
        assert_eq!(err["success"], false);
        assert_eq!(err["error"], "sin papel");
        assert!(err.get("message").is_none());
    }

    #[test]
    fn printers_response_serializes_both_shapes() {
        let ok = serde_json::to_value(PrintersResponse::available(
            vec![PrinterInfo::available("POS-80")],
            "POS-80".to_string(),
        ))
        .unwrap();
        assert_eq!(ok["available"], true);
        assert_eq!(ok["default"], "POS-80");
        assert_eq!(ok["printers"][0]["status"], "Disponible");

        let err = serde_json::to_value(PrintersResponse::error("boom")).unwrap();
        assert_eq!(err["error"], "boom");
        assert!(err.get("printers").is_none());
    }

    #[test]
    fn printing_status_uses_camel_case_module_flag() {
        let status = PrintingStatus {
            available: true,
            modules_loaded: true,
            message: "listo".to_string(),
        };
        let value = serde_json::to_value(status).unwrap();
        assert_eq!(value["modulesLoaded"], true);
    }
}

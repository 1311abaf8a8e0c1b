//! End-to-end render of a realistic ticket through the public surface.

use embarcadero::api::TicketData;
use embarcadero::core::PrintCapability;
use embarcadero::utils::ticket_renderer::{TicketRenderer, TICKET_WIDTH};
use image::Rgb;

fn sample_ticket() -> TicketData {
    serde_json::from_str(
        r#"{
            "codigo": "A1",
            "nombre": "Juan Perez",
            "documento": "123",
            "fecha": "01/01/2025",
            "hora": "10:00",
            "embarcacion": "Lancha 1",
            "adultos": 2,
            "ninos": 1,
            "total": "$50000",
            "generateQR": true
        }"#,
    )
    .unwrap()
}

#[test]
fn renders_full_ticket_from_wire_json() {
    let cap = PrintCapability::detect();
    let Some(fonts) = cap.fonts() else {
        return;
    };

    let ticket = sample_ticket();
    assert_eq!(ticket.passenger_summary(), "2 adultos, 1 niños");

    let image = TicketRenderer::new(fonts, &ticket).render();
    assert_eq!(image.width(), TICKET_WIDTH);
    assert!(image.height() > 600, "got height {}", image.height());

    // White background with black ink somewhere.
    assert_eq!(*image.get_pixel(0, 0), Rgb([255, 255, 255]));
    assert!(
        image.pixels().any(|p| *p == Rgb([0, 0, 0])),
        "nothing was drawn"
    );
}

#[test]
fn qr_disabled_produces_a_shorter_ticket() {
    let cap = PrintCapability::detect();
    let Some(fonts) = cap.fonts() else {
        return;
    };

    let with_qr = TicketRenderer::new(fonts, &sample_ticket()).render();

    let mut no_qr = sample_ticket();
    no_qr.generate_qr = false;
    let without_qr = TicketRenderer::new(fonts, &no_qr).render();

    assert!(with_qr.height() > without_qr.height());
}

//! QR payload encoder
//!
//! Serializes the verification subset of a ticket into a compact JSON
//! payload and encodes it as a QR image with a fixed 80x80 px footprint.
//! Encoding failure is recovered by the renderer with a placeholder square
//! of the same footprint, so layout geometry never depends on the encoder.

use crate::api::TicketData;
use image::imageops::FilterType;
use image::{DynamicImage, Luma, RgbImage};
use qrcode::QrCode;

/// Side length of the QR block on the ticket, in pixels.
pub const QR_SIZE: u32 = 80;

/// Verification payload: six ticket fields plus a fresh generation
/// timestamp. Absent fields serialize as null.
pub fn payload(ticket: &TicketData) -> String {
    serde_json::json!({
        "codigo": ticket.codigo,
        "pasajero": ticket.nombre,
        "documento": ticket.documento,
        "fecha": ticket.fecha,
        "hora": ticket.hora,
        "total": ticket.total,
        "timestamp": chrono::Local::now().to_rfc3339(),
    })
    .to_string()
}

/// Encode `payload` into an exactly [`QR_SIZE`]-square RGB image.
///
/// Version and error correction are chosen by the encoder to fit the data;
/// the raster is then resized to the fixed footprint with nearest-neighbour
/// so modules stay crisp.
pub fn encode(payload: &str) -> Result<RgbImage, String> {
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| format!("QR encode failed: {}", e))?;

    let raster = code
        .render::<Luma<u8>>()
        .module_dimensions(3, 3)
        .quiet_zone(true)
        .build();

    let resized = image::imageops::resize(&raster, QR_SIZE, QR_SIZE, FilterType::Nearest);
    Ok(DynamicImage::ImageLuma8(resized).to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_ticket_fields_and_timestamp() {
        let ticket = TicketData {
            codigo: Some("A1".to_string()),
            nombre: Some("Juan Perez".to_string()),
            total: Some("$50000".to_string()),
            ..Default::default()
        };
        let value: serde_json::Value = serde_json::from_str(&payload(&ticket)).unwrap();
        assert_eq!(value["codigo"], "A1");
        assert_eq!(value["pasajero"], "Juan Perez");
        assert_eq!(value["total"], "$50000");
        assert!(value["documento"].is_null());
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn encode_produces_fixed_footprint() {
        let img = encode(r#"{"codigo":"A1"}"#).unwrap();
        assert_eq!(img.dimensions(), (QR_SIZE, QR_SIZE));
    }

    #[test]
    fn encode_rejects_oversized_payload() {
        // Past QR version 40 capacity.
        let huge = "x".repeat(8000);
        assert!(encode(&huge).is_err());
    }
}

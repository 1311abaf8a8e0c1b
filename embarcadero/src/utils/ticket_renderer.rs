//! Thermal ticket renderer
//!
//! Composes the fixed-layout boarding ticket (80 mm paper, 300 px at
//! 96 DPI) as a single top-to-bottom pass over a y-cursor: header, ticket
//! info, passenger, trip, total banner, optional QR block, footer. Every
//! advance is a fixed template constant, so two renders of the same ticket
//! have identical geometry.
//!
//! The canvas is append-only: each draw grows the backing image before
//! touching it, and `finish` crops to the final cursor position plus the
//! trailing margin. Content can never be silently clipped by a bad height
//! guess.

use crate::api::TicketData;
use crate::utils::layout::{
    self, FontSet, LARGE_SCALE, NORMAL_SCALE, SMALL_SCALE, TITLE_SCALE, wrap_text,
};
use crate::utils::qr;
use ab_glyph::{FontVec, PxScale};
use chrono::{DateTime, Local};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut,
};
use imageproc::rect::Rect;
use tracing::warn;

/// Canvas width for 80 mm thermal paper at 96 DPI.
pub const TICKET_WIDTH: u32 = 300;
/// Cursor advance of the whole QR block (image + caption).
pub const QR_BLOCK_HEIGHT: u32 = 110;

const MARGIN: u32 = 10;
/// Value column offset from the left margin in label/value rows.
const VALUE_COLUMN: u32 = 80;
const START_Y: u32 = 20;
const ROW_HEIGHT: u32 = 15;
const WRAP_LINE_HEIGHT: u32 = 12;
/// Values longer than this are wrapped into stacked sub-lines.
const WRAP_THRESHOLD: usize = 20;
const BANNER_HEIGHT: u32 = 40;
const BOTTOM_MARGIN: u32 = 20;

const INITIAL_HEIGHT: u32 = 800;
const GROW_CHUNK: u32 = 256;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const LIGHT_GRAY: Rgb<u8> = Rgb([211, 211, 211]);
const GRAY: Rgb<u8> = Rgb([128, 128, 128]);

/// Append-only drawing surface with a running vertical cursor.
struct TicketCanvas {
    img: RgbImage,
    cursor: u32,
}

impl TicketCanvas {
    fn new() -> Self {
        Self {
            img: RgbImage::from_pixel(TICKET_WIDTH, INITIAL_HEIGHT, WHITE),
            cursor: START_Y,
        }
    }

    /// Grow the backing image so rows up to `bottom` exist.
    fn ensure(&mut self, bottom: u32) {
        let height = self.img.height();
        if bottom <= height {
            return;
        }
        let new_height = bottom.max(height + GROW_CHUNK);
        let mut bigger = RgbImage::from_pixel(TICKET_WIDTH, new_height, WHITE);
        image::imageops::overlay(&mut bigger, &self.img, 0, 0);
        self.img = bigger;
    }

    fn advance(&mut self, dy: u32) {
        self.cursor += dy;
    }

    /// Crop to the composed content plus the trailing margin.
    fn finish(mut self) -> RgbImage {
        let final_height = self.cursor + BOTTOM_MARGIN;
        self.ensure(final_height);
        image::imageops::crop_imm(&self.img, 0, 0, TICKET_WIDTH, final_height).to_image()
    }
}

#[derive(Clone, Copy)]
enum Face {
    Title,
    Normal,
    Small,
    Large,
}

/// Renders one [`TicketData`] into an RGB raster.
pub struct TicketRenderer<'a> {
    fonts: &'a FontSet,
    ticket: &'a TicketData,
    canvas: TicketCanvas,
}

impl<'a> TicketRenderer<'a> {
    pub fn new(fonts: &'a FontSet, ticket: &'a TicketData) -> Self {
        Self {
            fonts,
            ticket,
            canvas: TicketCanvas::new(),
        }
    }

    /// Compose the full ticket. QR encoding failure falls back to the
    /// placeholder square without changing the layout.
    pub fn render(self) -> RgbImage {
        self.render_with(qr::encode)
    }

    fn render_with<F>(mut self, encode: F) -> RgbImage
    where
        F: Fn(&str) -> Result<RgbImage, String>,
    {
        let now = Local::now();

        self.header();
        self.ticket_info(&now);
        self.passenger();
        self.trip();
        self.total_banner();

        if self.ticket.generate_qr {
            let qr_image = match encode(&qr::payload(self.ticket)) {
                Ok(img) => img,
                Err(e) => {
                    warn!(error = %e, "QR generation failed, drawing placeholder");
                    self.qr_placeholder()
                }
            };
            self.qr_block(&qr_image);
        }

        self.footer(&now);
        self.canvas.finish()
    }

    fn face(&self, face: Face) -> (&'a FontVec, PxScale) {
        match face {
            Face::Title => (&self.fonts.regular, PxScale::from(TITLE_SCALE)),
            Face::Normal => (&self.fonts.regular, PxScale::from(NORMAL_SCALE)),
            Face::Small => (&self.fonts.regular, PxScale::from(SMALL_SCALE)),
            Face::Large => (&self.fonts.bold, PxScale::from(LARGE_SCALE)),
        }
    }

    fn centered(&mut self, face: Face, text: &str, color: Rgb<u8>) {
        let (font, scale) = self.face(face);
        let y = self.canvas.cursor;
        self.canvas.ensure(y + 40);
        layout::draw_centered_text(&mut self.canvas.img, font, scale, y as i32, text, color);
    }

    fn left(&mut self, x: u32, face: Face, text: &str) {
        let (font, scale) = self.face(face);
        let y = self.canvas.cursor;
        self.canvas.ensure(y + 40);
        draw_text_mut(
            &mut self.canvas.img,
            BLACK,
            x as i32,
            y as i32,
            scale,
            font,
            text,
        );
    }

    /// Horizontal rule across the printable width at the current cursor.
    fn rule(&mut self, thickness: u32) {
        let y = self.canvas.cursor;
        self.canvas.ensure(y + thickness + 4);
        if thickness > 1 {
            draw_filled_rect_mut(
                &mut self.canvas.img,
                Rect::at(MARGIN as i32, y as i32).of_size(TICKET_WIDTH - 2 * MARGIN, thickness),
                BLACK,
            );
        } else {
            draw_line_segment_mut(
                &mut self.canvas.img,
                (MARGIN as f32, y as f32),
                ((TICKET_WIDTH - MARGIN) as f32, y as f32),
                BLACK,
            );
        }
    }

    /// Label/value row with the long-value wrapping rule: values past the
    /// wrap threshold render as stacked sub-lines at a tighter line height.
    fn field_row(&mut self, label: &str, value: &str) {
        self.left(MARGIN, Face::Small, label);
        if value.chars().count() > WRAP_THRESHOLD {
            let lines = wrap_text(value, WRAP_THRESHOLD);
            let y = self.canvas.cursor;
            self.canvas
                .ensure(y + lines.len() as u32 * WRAP_LINE_HEIGHT + 20);
            let (font, scale) = self.face(Face::Small);
            for (i, line) in lines.iter().enumerate() {
                draw_text_mut(
                    &mut self.canvas.img,
                    BLACK,
                    (MARGIN + VALUE_COLUMN) as i32,
                    (y + i as u32 * WRAP_LINE_HEIGHT) as i32,
                    scale,
                    font,
                    line,
                );
            }
            self.canvas.advance(lines.len() as u32 * WRAP_LINE_HEIGHT);
        } else {
            self.left(MARGIN + VALUE_COLUMN, Face::Small, value);
            self.canvas.advance(ROW_HEIGHT);
        }
    }

    fn header(&mut self) {
        self.centered(Face::Title, "EMBARCADERO FLOTANTE", BLACK);
        self.canvas.advance(25);
        self.centered(Face::Normal, "Malecón San Juan del Puerto", BLACK);
        self.canvas.advance(20);
        self.rule(2);
        self.canvas.advance(15);
    }

    fn ticket_info(&mut self, now: &DateTime<Local>) {
        self.left(MARGIN, Face::Title, "INFORMACIÓN DE TICKET");
        self.canvas.advance(20);

        let codigo = self.ticket.codigo().to_string();
        self.field_row("CÓDIGO:", &codigo);
        self.field_row("FECHA EMISIÓN:", &now.format("%d/%m/%Y").to_string());
        self.field_row("HORA EMISIÓN:", &now.format("%H:%M:%S").to_string());

        self.canvas.advance(10);
        self.rule(1);
        self.canvas.advance(15);
    }

    fn passenger(&mut self) {
        self.left(MARGIN, Face::Title, "DATOS DEL PASAJERO");
        self.canvas.advance(20);

        let nombre = self.ticket.nombre().to_string();
        let documento = self.ticket.documento().to_string();
        self.field_row("NOMBRE:", &nombre);
        self.field_row("DOCUMENTO:", &documento);
        if let Some(telefono) = self.ticket.telefono.clone() {
            self.field_row("TELÉFONO:", &telefono);
        }

        self.canvas.advance(10);
        self.rule(1);
        self.canvas.advance(15);
    }

    fn trip(&mut self) {
        self.left(MARGIN, Face::Title, "DETALLES DEL VIAJE");
        self.canvas.advance(20);

        let fecha = self.ticket.fecha().to_string();
        let hora = self.ticket.hora().to_string();
        let embarcacion = self.ticket.embarcacion().to_string();
        let pasajeros = self.ticket.passenger_summary();
        self.field_row("FECHA VIAJE:", &fecha);
        self.field_row("HORA SALIDA:", &hora);
        self.field_row("EMBARCACIÓN:", &embarcacion);
        self.field_row("PASAJEROS:", &pasajeros);

        self.canvas.advance(20);
    }

    fn total_banner(&mut self) {
        let y = self.canvas.cursor;
        self.canvas.ensure(y + BANNER_HEIGHT + 20);

        let banner = Rect::at(MARGIN as i32, y as i32)
            .of_size(TICKET_WIDTH - 2 * MARGIN, BANNER_HEIGHT);
        draw_filled_rect_mut(&mut self.canvas.img, banner, LIGHT_GRAY);
        // Two nested hollow rects give the 2 px outline.
        draw_hollow_rect_mut(&mut self.canvas.img, banner, BLACK);
        draw_hollow_rect_mut(
            &mut self.canvas.img,
            Rect::at(MARGIN as i32 + 1, y as i32 + 1)
                .of_size(TICKET_WIDTH - 2 * MARGIN - 2, BANNER_HEIGHT - 2),
            BLACK,
        );

        self.canvas.advance(10);
        self.centered(Face::Normal, "TOTAL A PAGAR", BLACK);
        self.canvas.advance(15);
        let total = self.ticket.total().to_string();
        self.centered(Face::Large, &total, BLACK);
        self.canvas.advance(25);
    }

    /// Bordered stand-in with the exact QR footprint, used when encoding
    /// fails so the rest of the layout is unaffected.
    fn qr_placeholder(&self) -> RgbImage {
        let side = qr::QR_SIZE;
        let mut img = RgbImage::from_pixel(side, side, WHITE);
        draw_hollow_rect_mut(&mut img, Rect::at(0, 0).of_size(side, side), BLACK);
        draw_hollow_rect_mut(&mut img, Rect::at(1, 1).of_size(side - 2, side - 2), BLACK);
        let (font, scale) = self.face(Face::Small);
        layout::draw_centered_text(&mut img, font, scale, (side / 2) as i32 - 5, "QR CODE", BLACK);
        img
    }

    fn qr_block(&mut self, qr_image: &RgbImage) {
        let y = self.canvas.cursor;
        self.canvas.ensure(y + QR_BLOCK_HEIGHT + 20);
        let x = (TICKET_WIDTH - qr::QR_SIZE) / 2;
        image::imageops::overlay(&mut self.canvas.img, qr_image, x as i64, y as i64);
        self.canvas.advance(qr::QR_SIZE + 10);
        self.centered(Face::Small, "Escanee para verificar", BLACK);
        self.canvas.advance(20);
    }

    fn footer(&mut self, now: &DateTime<Local>) {
        self.canvas.advance(15);
        self.rule(1);
        self.canvas.advance(15);

        self.centered(Face::Title, "CONSERVE ESTE TICKET", BLACK);
        self.canvas.advance(20);

        for line in [
            "Válido únicamente para",
            "la fecha y hora indicadas",
            "Embalse de Guatapé",
            "Antioquia - Colombia",
        ] {
            self.centered(Face::Small, line, BLACK);
            self.canvas.advance(15);
        }

        self.canvas.advance(10);
        let stamp = now.format("%d/%m/%Y %H:%M:%S").to_string();
        self.centered(Face::Small, &stamp, GRAY);
        self.canvas.advance(20);
    }
}

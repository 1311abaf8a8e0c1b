//! Windows spooler access
//!
//! Enumeration and default-printer queries go through winspool
//! (`EnumPrintersW`, `GetDefaultPrinterW`); dispatch hands the spooled
//! bitmap to the shell "print" file association (`ShellExecuteW`), which
//! queues the job out-of-process. The handoff is fire-and-forget: a
//! successful return means the job was accepted by the OS handler, not
//! that paper came out of the device.

use crate::bitmap::SpoolBitmap;
use crate::error::{PrintError, PrintResult};
use image::RgbImage;
use std::path::Path;
use tracing::info;
use windows::Win32::Graphics::Printing::{ClosePrinter, PRINTER_HANDLE};

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Closes the printer handle on every exit path.
struct PrinterGuard(PRINTER_HANDLE);

impl Drop for PrinterGuard {
    fn drop(&mut self) {
        unsafe {
            let _ = ClosePrinter(self.0);
        }
    }
}

/// A driver printer addressed by its spooler name.
pub struct SpoolPrinter {
    name: String,
}

impl SpoolPrinter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Get the printer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// List printers installed locally or reachable through a connection.
    pub fn list() -> PrintResult<Vec<String>> {
        use windows::Win32::Graphics::Printing::{
            EnumPrintersW, PRINTER_ENUM_CONNECTIONS, PRINTER_ENUM_LOCAL, PRINTER_INFO_4W,
        };
        use windows::core::PWSTR;

        unsafe {
            let flags = PRINTER_ENUM_LOCAL | PRINTER_ENUM_CONNECTIONS;
            let mut needed: u32 = 0;
            let mut returned: u32 = 0;

            let _ = EnumPrintersW(flags, None, 4, None, &mut needed, &mut returned);

            if needed == 0 {
                return Ok(Vec::new());
            }

            let mut buf: Vec<u8> = vec![0; needed as usize];
            EnumPrintersW(
                flags,
                None,
                4,
                Some(buf.as_mut_slice()),
                &mut needed,
                &mut returned,
            )
            .map_err(|_| PrintError::Spooler("EnumPrintersW failed".to_string()))?;

            let ptr = buf.as_ptr() as *const PRINTER_INFO_4W;
            let slice = std::slice::from_raw_parts(ptr, returned as usize);

            let mut result: Vec<String> = Vec::new();
            for info in slice.iter() {
                if info.pPrinterName.is_null() {
                    continue;
                }
                let name = PWSTR(info.pPrinterName.0).to_string().unwrap_or_default();
                if !name.is_empty() {
                    result.push(name);
                }
            }

            Ok(result)
        }
    }

    /// Get the default printer name, `None` when the OS has no default set.
    pub fn default_printer() -> PrintResult<Option<String>> {
        use windows::Win32::Graphics::Printing::GetDefaultPrinterW;
        use windows::core::PWSTR;

        unsafe {
            let mut needed: u32 = 0;
            let _ = GetDefaultPrinterW(None, &mut needed);

            if needed == 0 {
                return Ok(None);
            }

            let mut buf: Vec<u16> = vec![0; needed as usize];
            let ok = GetDefaultPrinterW(Some(PWSTR(buf.as_mut_ptr())), &mut needed);

            if !ok.as_bool() {
                return Ok(None);
            }

            let name = PWSTR(buf.as_mut_ptr())
                .to_string()
                .map_err(|e| PrintError::Spooler(format!("UTF-16 decode failed: {}", e)))?;

            Ok(Some(name))
        }
    }

    /// Resolve a printer name - returns the name if valid, or default/first available
    pub fn resolve(name: Option<&str>) -> PrintResult<String> {
        if let Some(name) = name {
            let printers = Self::list()?;
            if printers.iter().any(|p| p == name) {
                return Ok(name.to_string());
            }
            return Err(PrintError::NotFound(name.to_string()));
        }

        if let Some(default) = Self::default_printer()? {
            return Ok(default);
        }

        let printers = Self::list()?;
        printers.first().cloned().ok_or(PrintError::NoPrinters)
    }

    /// Hand a spooled file to the shell "print" verb while holding a handle
    /// to the target printer.
    ///
    /// The handle does not carry the job (the file association does); it
    /// pins the printer for the duration of the handoff and is released on
    /// every exit path.
    pub fn print_file(&self, path: &Path) -> PrintResult<()> {
        use windows::Win32::Graphics::Printing::OpenPrinterW;
        use windows::Win32::UI::Shell::ShellExecuteW;
        use windows::Win32::UI::WindowsAndMessaging::SW_HIDE;
        use windows::core::PCWSTR;

        let name_w = to_wide(&self.name);
        let verb_w = to_wide("print");
        let path_w = to_wide(&path.display().to_string());

        unsafe {
            let mut handle = PRINTER_HANDLE::default();
            OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None)
                .map_err(|_| PrintError::Spooler("OpenPrinterW failed".to_string()))?;
            let _guard = PrinterGuard(handle);

            let hinst = ShellExecuteW(
                None,
                PCWSTR::from_raw(verb_w.as_ptr()),
                PCWSTR::from_raw(path_w.as_ptr()),
                PCWSTR::null(),
                PCWSTR::null(),
                SW_HIDE,
            );

            // Per ShellExecute contract, values <= 32 are error codes.
            if hinst.0 as isize <= 32 {
                return Err(PrintError::Spooler(format!(
                    "shell print handoff failed (code {})",
                    hinst.0 as isize
                )));
            }
        }

        Ok(())
    }
}

/// Spool `image` as a temp BMP and hand it to `printer_name`.
///
/// The temp file is removed before returning, whether the handoff
/// succeeded or failed.
pub fn print_bitmap(image: &RgbImage, printer_name: &str) -> PrintResult<()> {
    let spool = SpoolBitmap::write(image)?;
    info!(
        printer = printer_name,
        path = %spool.path().display(),
        "submitting ticket bitmap to spooler"
    );
    SpoolPrinter::new(printer_name).print_file(spool.path())
}

//! Punto de venta de tiquetes de muelle - printing backend.
//!
//! Renders passenger-ferry tickets to a 300px-wide raster and hands them
//! to the OS print spooler. The `commands` module is the call surface a
//! hosting UI binds to; `utils` holds rendering and spooling, `core` the
//! one-time capability probe taken at startup.

pub mod api;
pub mod commands;
pub mod core;
pub mod utils;

use crate::core::PrintCapability;

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Install the tracing subscriber: stderr plus a daily-rolling file in
/// `log_dir`. The returned guard must stay alive for the file writer to
/// flush; drop it only at process exit.
pub fn init_tracing(log_dir: &str) -> Result<WorkerGuard, String> {
    let file_appender = tracing_appender::rolling::daily(log_dir, "embarcadero.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_timer(LocalTimer)
        .with_ansi(false)
        .with_target(true);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(LocalTimer)
        .with_target(false)
        .with_filter(LevelFilter::INFO);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| format!("failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}

/// Startup banner printed once, mirroring what the printing subsystem
/// probe found. Goes to stdout so it shows up without any log config.
pub fn print_startup_banner(cap: &PrintCapability) {
    println!("{}", "=".repeat(50));
    println!("🖨️  SISTEMA DE IMPRESIÓN DE TIQUETES");
    println!("{}", "=".repeat(50));

    if cap.available() {
        println!("✅ {}", cap.message());
        match utils::printing::list_printers() {
            Ok(printers) => {
                println!("✅ Impresoras detectadas: {}", printers.len());
                if let Ok(Some(default)) = utils::printing::default_printer() {
                    println!("✅ Impresora predeterminada: {}", default);
                }
            }
            Err(e) => println!("⚠️  No se pudieron listar impresoras: {}", e),
        }
    } else {
        println!("❌ {}", cap.message());
    }

    println!("{}", "=".repeat(50));
}

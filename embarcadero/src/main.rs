use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::error;

use embarcadero::api::TicketData;
use embarcadero::commands;
use embarcadero::core::PrintCapability;
use embarcadero::utils::ticket_renderer::TicketRenderer;

#[derive(Parser)]
#[command(name = "embarcadero", version, about = "Impresión de tiquetes de muelle")]
struct Cli {
    /// Target printer. Defaults to the system default printer.
    #[arg(long, global = true)]
    printer: Option<String>,

    /// Directory for rolling log files.
    #[arg(long, env = "EMBARCADERO_LOG_DIR", default_value = "logs")]
    log_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List installed printers and the system default
    Printers,
    /// Report printing subsystem status
    Status,
    /// Print a synthetic test ticket
    Test,
    /// Print a ticket from a JSON file
    Print {
        /// Ticket JSON file
        file: PathBuf,
    },
    /// Render a ticket to an image file without printing
    Render {
        /// Ticket JSON file
        file: PathBuf,
        /// Output image path
        #[arg(short, long, default_value = "ticket.png")]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match embarcadero::init_tracing(&cli.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("advertencia: {}", e);
            None
        }
    };

    let cap = PrintCapability::detect();
    embarcadero::print_startup_banner(&cap);

    match run(&cli, &cap) {
        Ok(ok) if ok => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, cap: &PrintCapability) -> anyhow::Result<bool> {
    match &cli.command {
        Command::Printers => {
            let response = commands::get_printers(cap);
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(true)
        }
        Command::Status => {
            let status = commands::check_printing_status(cap);
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(status.available)
        }
        Command::Test => {
            let outcome = commands::test_printer(cap, cli.printer.clone());
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(outcome.is_success())
        }
        Command::Print { file } => {
            let ticket = load_ticket(file)?;
            let outcome = commands::print_ticket(cap, &ticket, cli.printer.clone());
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(outcome.is_success())
        }
        Command::Render { file, out } => {
            let ticket = load_ticket(file)?;
            let fonts = cap
                .fonts()
                .with_context(|| cap.message().to_string())?;
            let image = TicketRenderer::new(fonts, &ticket).render();
            image
                .save(out)
                .with_context(|| format!("no se pudo guardar {}", out.display()))?;
            println!("Tiquete renderizado en {}", out.display());
            Ok(true)
        }
    }
}

fn load_ticket(file: &PathBuf) -> anyhow::Result<TicketData> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("no se pudo leer {}", file.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("JSON inválido en {}", file.display()))
}

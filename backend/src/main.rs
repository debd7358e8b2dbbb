//! Auditlog CLI - Refund audit log extraction and export
//!
//! # Commands
//!
//! ```bash
//! auditlog serve                      # Start HTTP server (port 5000)
//! auditlog extract audit.txt          # Extract line items as JSON
//! auditlog export items.json          # Write an Excel workbook
//! auditlog export items.json --google # Create a shared Google spreadsheet
//! auditlog history list               # Show past exports
//! ```

use auditlog::{
    extract_file, server::start_server, ConfigOverrides, ExportHistory, ExportType, Exporter, LineItem,
    ServerConfig, SheetsClient, Strategy,
};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "auditlog")]
#[command(about = "Extract refund audit log items and export them to Excel or Google Sheets", long_about = None)]
struct Cli {
    /// Data directory (history records, exports)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory for exported workbooks
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// Built frontend to serve (trunk `dist/`)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Extract line items from a .txt or .pdf report
    Extract {
        /// Input report
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export a JSON array of line items
    Export {
        /// Input JSON file (array of items)
        input: PathBuf,

        /// Export to Google Sheets instead of Excel
        #[arg(long)]
        google: bool,

        /// Directory for the workbook (default: configured export dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage the export history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List past exports, newest first
    List,

    /// Delete an export record
    Delete {
        /// Record ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let data_dir = cli.data_dir;

    let result = match cli.command {
        Commands::Serve {
            port,
            export_dir,
            static_dir,
        } => {
            let overrides = ConfigOverrides {
                port,
                data_dir,
                export_dir,
                static_dir,
            };
            cmd_serve(overrides).await
        }

        Commands::Extract { input, output } => cmd_extract(&input, output.as_deref()),

        Commands::Export { input, google, output } => {
            let overrides = ConfigOverrides {
                data_dir,
                export_dir: output,
                ..Default::default()
            };
            cmd_export(&input, google, overrides).await
        }

        Commands::History { action } => {
            let overrides = ConfigOverrides {
                data_dir,
                ..Default::default()
            };
            cmd_history(action, overrides)
        }
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(overrides: ConfigOverrides) -> Result<(), Box<dyn std::error::Error>> {
    start_server(ServerConfig::resolve(overrides)).await
}

fn cmd_extract(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Extracting: {}", input.display());

    let extraction = extract_file(input)?;
    if let Some(encoding) = &extraction.encoding {
        eprintln!("   Encoding: {}", encoding);
    }
    let parser = match extraction.strategy {
        Strategy::As400 => "AS400 fixed-width",
        Strategy::LineScan => "line scan",
    };
    eprintln!("   Parser: {}", parser);
    eprintln!("✅ Extracted {} items", extraction.items.len());

    let json = serde_json::to_string_pretty(&extraction.items)?;
    write_output(&json, output)
}

async fn cmd_export(input: &Path, google: bool, overrides: ConfigOverrides) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::resolve(overrides);

    let content = fs::read_to_string(input)?;
    let items: Vec<LineItem> = serde_json::from_str(&content)?;
    eprintln!("📦 Loaded {} items from {}", items.len(), input.display());

    let (export_type, sheets) = if google {
        (ExportType::Google, Some(SheetsClient::from_env()?))
    } else {
        (ExportType::Excel, None)
    };

    let exporter = Exporter::new(config.export_dir.clone(), sheets);
    let record = exporter.export(export_type, items).await?;

    let mut history = ExportHistory::with_dir(config.history_dir());
    history.record(record.clone())?;

    match (&record.file_path, &record.sheet_url) {
        (Some(path), _) => eprintln!("💾 Workbook written to: {}", path),
        (_, Some(url)) => eprintln!("🔗 Spreadsheet: {}", url),
        _ => {}
    }
    eprintln!("✨ Done! (record {})", record.id);
    Ok(())
}

fn cmd_history(action: HistoryAction, overrides: ConfigOverrides) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::resolve(overrides);
    let mut history = ExportHistory::with_dir(config.history_dir());

    match action {
        HistoryAction::List => {
            let records = history.list();
            if records.is_empty() {
                eprintln!("📋 No exports recorded yet.");
                eprintln!("   Use 'auditlog export <items.json>' or the web UI to create one.");
                return Ok(());
            }

            eprintln!("📋 Exports ({}):\n", records.len());
            for r in records {
                println!(
                    "  {} [{}] {} ({} items)",
                    r.created_at.format("%Y-%m-%d %H:%M:%S"),
                    r.export_type.as_str(),
                    r.filename,
                    r.item_count
                );
                if let Some(url) = &r.sheet_url {
                    println!("     URL: {}", url);
                }
                if let Some(path) = &r.file_path {
                    println!("     File: {}", path);
                }
                println!("     ID: {}", r.id);
                println!();
            }
        }

        HistoryAction::Delete { id } => {
            history.delete(&id)?;
            eprintln!("🗑️  Deleted record {}", id);
        }
    }

    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

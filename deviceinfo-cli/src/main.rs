//! Deviceinfo CLI - device intake extraction from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use deviceinfo::{
    backend::{configure_shared, BackendClient},
    DeviceInfoCore, ExtractionReport, RentalEvent, RentalWatcher,
};
use std::io::Read;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "deviceinfo")]
#[command(about = "Device intake extraction tool", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a device record from a paste file (or stdin)
    Extract {
        /// Path to a pasted-text file; reads stdin when omitted
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with an error code when no field could be extracted
        #[arg(long)]
        fail_on_empty: bool,
    },

    /// Extract device records from every .txt paste file in a directory
    Batch {
        /// Path to a directory of paste files
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// List the labels recognized by the extractor
    Labels {
        /// Show legacy labels too
        #[arg(short, long)]
        verbose: bool,
    },

    /// Watch tool-license rentals and print expiry alerts
    Watch {
        /// Backend base URL
        #[arg(value_name = "URL")]
        url: String,

        /// API key for the backend (falls back to DEVICEINFO_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Poll interval in seconds
        #[arg(long, default_value_t = 60)]
        interval: u64,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripting
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Extract {
            file,
            format,
            fail_on_empty,
        } => handle_extract(file.as_deref(), format, fail_on_empty),
        Commands::Batch { dir, format } => handle_batch(&dir, format),
        Commands::Labels { verbose } => {
            handle_labels(verbose);
            0
        }
        Commands::Watch {
            url,
            api_key,
            interval,
        } => handle_watch(&url, api_key, interval),
    };

    process::exit(exit_code);
}

fn handle_extract(
    file: Option<&std::path::Path>,
    format: OutputFormat,
    fail_on_empty: bool,
) -> i32 {
    let report = match file {
        Some(path) => match DeviceInfoCore::extract_file(path) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        },
        None => {
            let mut text = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut text) {
                eprintln!("Error: {}", e);
                return 1;
            }
            DeviceInfoCore::report_for_text("-", &text)
        }
    };

    output_reports(std::slice::from_ref(&report), &format);
    if fail_on_empty && report.is_empty() {
        return 1;
    }
    0
}

fn handle_batch(dir: &std::path::Path, format: OutputFormat) -> i32 {
    match DeviceInfoCore::extract_batch(dir) {
        Ok(reports) => {
            output_reports(&reports, &format);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn output_reports(reports: &[ExtractionReport], format: &OutputFormat) {
    match format {
        OutputFormat::Human => output_human(reports),
        OutputFormat::Json => output_json(reports),
    }
}

fn output_human(reports: &[ExtractionReport]) {
    for report in reports {
        println!("\nFile: {}", report.file.display());
        println!("{}", "─".repeat(60));

        print_field("IMEI", &report.record.imei);
        print_field("Brand", &report.record.brand);
        print_field("Model name", &report.record.model_name);
        print_field("Market model", &report.record.market_model);
        print_field("Model code", &report.record.model_code);
        print_field("Memory", &report.record.memory);
        print_field("Serial", &report.record.serial);

        println!(
            "\n  Summary: {} field(s) filled, {} missing",
            report.stats.filled, report.stats.missing
        );
    }
}

fn print_field(name: &str, value: &Option<String>) {
    match value {
        Some(v) => println!("  {:<14} {}", name, v),
        None => println!("  {:<14} (not found)", name),
    }
}

fn output_json(reports: &[ExtractionReport]) {
    let output = serde_json::json!({
        "results": reports.iter().map(|r| {
            serde_json::json!({
                "file": r.file.display().to_string(),
                "record": &r.record,
                "stats": &r.stats,
            })
        }).collect::<Vec<_>>(),
        "summary": {
            "total_files": reports.len(),
            "filled_fields": reports.iter().map(|r| r.stats.filled).sum::<usize>(),
            "empty_records": reports.iter().filter(|r| r.is_empty()).count(),
        }
    });
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn handle_labels(verbose: bool) {
    println!("Recognized labels:\n");

    let structured = [
        ("marca:", "Brand"),
        ("nombre del tlf:", "Model name"),
        ("nombre del telefono:", "Model name"),
        ("nombre:", "Model name"),
        ("model name:", "Model name (first word seeds the brand)"),
        ("sku name:", "Model name (first word seeds the brand)"),
        ("model full description:", "Model name (first word seeds the brand)"),
        ("modelo:", "Model code"),
        ("model code:", "Model code"),
        ("model number:", "Model code"),
        ("imei:", "IMEI (overrides any unlabeled detection)"),
        ("origen:", "Serial (colon optional)"),
        ("serie:", "Serial (colon optional)"),
        ("sn:", "Serial"),
        ("serial number:", "Serial"),
        ("market model:", "Market model"),
        ("memory:", "Memory"),
    ];

    for (label, field) in &structured {
        println!("  {:<26} {}", label, field);
    }

    if verbose {
        println!("\nLegacy labels (older export format):\n");
        let legacy = [
            ("model description:", "Brand"),
            ("model name:", "Model name"),
            ("market model:", "Market model"),
            ("model code:", "Model code"),
            ("memory:", "Memory"),
            ("serial:", "Serial"),
        ];
        for (label, field) in &legacy {
            println!("  {:<26} {}", label, field);
        }
        println!("\nUnlabeled lines fall back to shape heuristics:");
        println!("  - first line without a colon becomes the model name");
        println!("  - short letter prefix plus digits becomes the model code");
        println!("  - 9-19 uppercase letters/digits becomes the serial");
    }
}

fn handle_watch(url: &str, api_key: Option<String>, interval: u64) -> i32 {
    let api_key = api_key.or_else(|| std::env::var("DEVICEINFO_API_KEY").ok());

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    runtime.block_on(async move {
        let client = match BackendClient::new(url, api_key) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        };
        let client = match configure_shared(client) {
            Ok(client) => client,
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        };

        let mut watcher = RentalWatcher::new(Duration::from_secs(interval));
        let mut events = watcher.subscribe();
        if let Err(e) = watcher.start(client) {
            eprintln!("Error: {}", e);
            return 1;
        }

        println!(
            "Watching rentals at {} every {}s (Ctrl-C to stop)",
            url, interval
        );

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Ok(RentalEvent::Expired(rental)) => {
                        println!(
                            "EXPIRED  {}  {} (worker {}, due {})",
                            rental.id, rental.tool, rental.worker, rental.expires_at
                        );
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(_) => return 0,
                },
                _ = tokio::signal::ctrl_c() => {
                    watcher.stop();
                    return 0;
                }
            }
        }
    })
}

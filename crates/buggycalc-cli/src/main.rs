//! buggycalc CLI - drive the buggycalc calculator over ADB
//!
//! Usage:
//!     buggycalc [OPTIONS] <COMMAND>
//!
//! Environment Variables:
//!     BUGGYCALC_PACKAGE: App package name (default: com.admsqa.buggycalc)
//!     BUGGYCALC_ACTIVITY: Launch activity (default: .MainActivity)
//!     BUGGYCALC_SCREENSHOT_DIR: Where pulled screenshots are saved (default: logs/screenshots)
//!     BUGGYCALC_LOG_DIR: Where rolling log files are written (default: logs/automation)
//!     BUGGYCALC_COMMAND_TIMEOUT / BUGGYCALC_LAUNCH_DELAY / BUGGYCALC_TAP_DELAY: Timing in seconds

use anyhow::{anyhow, bail, Result};
use buggycalc::{
    adb_command, scenario_screenshot_name, timestamped_screenshot_name, AdbController,
    CalculatorPage, CommandRunner, Field, FieldSnapshot, SystemRunner, DEFAULT_ACTIVITY, DEFAULT_PACKAGE,
    DEFAULT_SCREENSHOT_DIR,
};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// buggycalc - UI automation for the buggycalc calculator
#[derive(Parser, Debug)]
#[command(name = "buggycalc")]
#[command(about = "UI automation for the buggycalc Android calculator")]
#[command(after_help = r#"Examples:
    # Verify adb and a connected device
    buggycalc check

    # Start the app, add two numbers and read the result
    buggycalc launch
    buggycalc calc + 1 2

    # Type into an input and read it back
    buggycalc set first_number -0.001
    buggycalc read first_number

    # Save a screenshot named after a scenario
    buggycalc screenshot --scenario "Add two numbers"

    # Dump every field as JSON
    buggycalc inspect --json
"#)]
struct Cli {
    /// App package name
    #[arg(long, env = "BUGGYCALC_PACKAGE", default_value = DEFAULT_PACKAGE)]
    package: String,

    /// Launch activity
    #[arg(long, env = "BUGGYCALC_ACTIVITY", default_value = DEFAULT_ACTIVITY)]
    activity: String,

    /// Directory for pulled screenshots
    #[arg(long, env = "BUGGYCALC_SCREENSHOT_DIR", default_value = DEFAULT_SCREENSHOT_DIR)]
    screenshot_dir: PathBuf,

    /// Directory for rolling log files
    #[arg(long, env = "BUGGYCALC_LOG_DIR", default_value = "logs/automation")]
    log_dir: PathBuf,

    /// Only print warnings and errors to the console
    #[arg(short = 'q', long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that adb is installed and a device is connected
    Check,
    /// Launch the app and wait for it to load
    Launch,
    /// Force-stop the app
    Close,
    /// Tap a field's center
    Tap { field: Field },
    /// Print the text displayed by a field
    Read {
        #[arg(default_value = "=")]
        field: Field,
    },
    /// Focus a field and type a value into it
    Set {
        field: Field,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Clear one input field, or both when none is given
    Clear { field: Option<Field> },
    /// Clear the inputs, enter operands, tap an operator and print the result
    Calc {
        operation: Field,
        #[arg(allow_hyphen_values = true)]
        first: Option<String>,
        #[arg(allow_hyphen_values = true)]
        second: Option<String>,
    },
    /// Capture a screenshot and pull it into the screenshot directory
    Screenshot {
        /// File name without the .png extension
        name: Option<String>,
        /// Derive the name from a scenario title
        #[arg(long, conflicts_with = "name")]
        scenario: Option<String>,
    },
    /// Print bounds and text of every field
    Inspect {
        #[arg(long)]
        json: bool,
    },
    /// List addressable fields
    Fields,
}

/// Console output plus daily-rotated files under `log_dir`
///
/// The console follows `RUST_LOG` (default `info`, or `warn` with `--quiet`);
/// files always record debug detail for this crate. Buffered file output is
/// flushed when the returned guard is dropped.
fn init_tracing(log_dir: &Path, quiet: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("buggycalc")
        .filename_suffix("log")
        .max_log_files(5)
        .build(log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if quiet { "warn" } else { "info" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_filter(console_filter),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(EnvFilter::new("buggycalc=debug,info")),
        )
        .try_init()?;

    Ok(guard)
}

/// Check system requirements before driving the device
fn check_system_requirements() -> Result<bool> {
    println!("\u{1F50D} Checking system requirements...");
    println!("{}", "-".repeat(50));

    print!("1. Checking ADB installation... ");
    io::stdout().flush().ok();

    if which::which("adb").is_err() {
        println!("\u{274C} FAILED");
        println!("   Error: ADB is not installed or not in PATH.");
        println!("   Solution: Install ADB:");
        println!("     - macOS: brew install android-platform-tools");
        println!("     - Linux: sudo apt install android-tools-adb");
        println!(
            "     - Windows: Download from https://developer.android.com/studio/releases/platform-tools"
        );
        return Ok(false);
    }

    let adb = AdbController::new(SystemRunner::with_timeout(Duration::from_secs(10))?);
    match adb.execute(&adb_command(&["version"]), true) {
        Ok(stdout) => {
            let version_line = stdout.lines().next().unwrap_or("").trim();
            println!(
                "\u{2705} OK ({})",
                if version_line.is_empty() {
                    "installed"
                } else {
                    version_line
                }
            );
        }
        Err(e) => {
            println!("\u{274C} FAILED");
            println!("   Error: {}", e);
            return Ok(false);
        }
    }

    print!("2. Checking connected devices... ");
    io::stdout().flush().ok();

    match list_devices(&adb) {
        Ok(devices) if devices.is_empty() => {
            println!("\u{274C} FAILED");
            println!("   Error: No devices connected.");
            println!("   Solution:");
            println!("     1. Enable USB debugging on your Android device");
            println!("     2. Connect via USB and authorize the connection");
            println!("     3. Or start an emulator with the calculator installed");
            Ok(false)
        }
        Ok(devices) if devices.len() > 1 => {
            println!("\u{274C} FAILED");
            println!(
                "   Error: {} devices connected ({}); exactly one is supported.",
                devices.len(),
                devices.join(", ")
            );
            Ok(false)
        }
        Ok(devices) => {
            println!("\u{2705} OK ({})", devices[0]);
            println!("{}", "-".repeat(50));
            println!("\u{2705} All system checks passed!");
            Ok(true)
        }
        Err(e) => {
            println!("\u{274C} FAILED");
            println!("   Error: {}", e);
            Ok(false)
        }
    }
}

/// Serial numbers of devices in the `device` state
fn list_devices<R: CommandRunner>(adb: &AdbController<R>) -> Result<Vec<String>> {
    let stdout = adb.execute(&adb_command(&["devices"]), true)?;
    Ok(parse_devices(&stdout))
}

fn parse_devices(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty() && line.contains("\tdevice"))
        .filter_map(|line| line.split('\t').next())
        .map(|serial| serial.to_string())
        .collect()
}

fn print_fields() {
    println!("Addressable fields:");
    for field in Field::ALL {
        println!("  {:<14} {}", field.symbol(), field.resource_key());
    }
}

fn print_snapshot(snapshot: &[FieldSnapshot]) {
    println!("{:<14} {:<22} {}", "FIELD", "BOUNDS", "TEXT");
    println!("{}", "-".repeat(60));
    for entry in snapshot {
        let bounds = entry
            .bounds
            .map(|b| format!("[{},{}][{},{}]", b.left, b.top, b.right, b.bottom))
            .unwrap_or_else(|| "-".to_string());
        let text = entry.text.as_deref().unwrap_or("-");
        println!("{:<14} {:<22} {}", entry.field.symbol(), bounds, text);
    }
}

fn run(args: &Cli) -> Result<()> {
    match &args.command {
        Commands::Fields => {
            print_fields();
            return Ok(());
        }
        Commands::Check => {
            if !check_system_requirements()? {
                bail!("System requirements check failed");
            }
            return Ok(());
        }
        _ => {}
    }

    let calculator = CalculatorPage::connect(&args.package, &args.activity)?
        .with_screenshot_dir(&args.screenshot_dir);

    match &args.command {
        // Answered above without a device
        Commands::Check | Commands::Fields => {}
        Commands::Launch => calculator.launch()?,
        Commands::Close => calculator.close()?,
        Commands::Tap { field } => calculator.tap(*field)?,
        Commands::Read { field } => println!("{}", calculator.read(*field)?),
        Commands::Set { field, value } => calculator.set_field(*field, value)?,
        Commands::Clear { field: Some(field) } => calculator.clear_field(*field)?,
        Commands::Clear { field: None } => calculator.clear_all_inputs()?,
        Commands::Calc {
            operation,
            first,
            second,
        } => {
            if !operation.is_operator() {
                return Err(anyhow!("'{}' is not an operator button", operation));
            }
            let result =
                calculator.perform_calculation(*operation, first.as_deref(), second.as_deref())?;
            println!("{}", result);
        }
        Commands::Screenshot { name, scenario } => {
            let name = match (name, scenario) {
                (_, Some(scenario)) => scenario_screenshot_name(scenario),
                (Some(name), None) => name.clone(),
                (None, None) => timestamped_screenshot_name(),
            };
            let report = calculator.capture_and_retrieve_screenshot(&name)?;
            match report.dimensions {
                Some((width, height)) => {
                    println!("{} ({}x{})", report.path.display(), width, height)
                }
                None => println!("{}", report.path.display()),
            }
        }
        Commands::Inspect { json } => {
            let snapshot = calculator.snapshot()?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_snapshot(&snapshot);
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let _guard = init_tracing(&args.log_dir, args.quiet)?;
    info!("Running {:?} against {}", args.command, args.package);

    run(&args)
}

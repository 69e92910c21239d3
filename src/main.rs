//! ADXL345 recorder - sample until Ctrl+C, then export a signal file
//!
//! Usage:
//!   adxl345-recorder --device /dev/i2c-1 --output out.signals.out

use adxl345_signal_recorder::{
    collect, signals_format, Adxl345, I2cBus, RecorderError, Recording, TimeKeeper,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "adxl345-recorder")]
#[command(about = "Record ADXL345 acceleration to a signal file", long_about = None)]
struct Args {
    /// I2C bus device node
    #[arg(short, long, default_value = "/dev/i2c-1")]
    device: PathBuf,

    /// Output signal file path (overwritten)
    #[arg(short, long, default_value = "./out.signals.out")]
    output: PathBuf,

    /// Delay after each read before the next one, in milliseconds (1-1000)
    #[arg(short, long, default_value = "10")]
    interval_ms: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.interval_ms == 0 || args.interval_ms > 1000 {
        return Err(Box::new(RecorderError::InvalidParameter(format!(
            "Interval must be 1-1000 ms, got {}",
            args.interval_ms
        ))));
    }

    println!("ADXL345 Recorder");
    println!("================");
    println!("Bus: {}", args.device.display());
    println!("Output file: {}", args.output.display());
    println!("Interval: {} ms", args.interval_ms);
    println!();

    // Bring-up failures are fatal
    println!("Initializing sensor...");
    let bus = I2cBus::open(&args.device)?;
    let mut sensor = match Adxl345::initialize(bus) {
        Ok(s) => {
            println!("Sensor initialized at address 0x{:02X}\n", s.address());
            s
        }
        Err(RecorderError::DeviceCount(found)) => {
            eprintln!("Error: expected exactly one I2C device, found {}.", found.len());
            eprintln!("Please check:");
            eprintln!("  1. The ADXL345 is wired to {}", args.device.display());
            eprintln!("  2. No other device shares the bus");
            return Err(Box::new(RecorderError::DeviceCount(found)));
        }
        Err(e) => {
            eprintln!("Error initializing sensor: {}", e);
            return Err(Box::new(e));
        }
    };

    // Setup Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        println!("\nexiting!");
        r.store(false, Ordering::SeqCst);
    })?;

    println!("Started: {}", chrono::Local::now().to_rfc3339());
    println!("Press Ctrl+C to stop and export\n");

    let timer = TimeKeeper::new();
    let mut recording = Recording::new();
    let result = collect(
        &mut sensor,
        &mut recording,
        Duration::from_millis(args.interval_ms),
        &running,
    );

    // Export whatever was recorded, even if collection ended on a read error
    if result.is_err() {
        eprintln!("\nCollection stopped by a read error, exporting {} samples...", recording.len());
    }
    signals_format::write_signals(&args.output, &recording)?;

    let elapsed = timer.elapsed_secs();
    println!("\nExport complete!");
    println!("Total samples: {}", recording.len());
    println!("Elapsed time: {:.2} seconds", elapsed);
    if elapsed > 0.0 {
        println!("Actual sample rate: {:.1} Hz", recording.len() as f64 / elapsed);
    }
    println!("File: {}", args.output.display());

    result?;
    Ok(())
}

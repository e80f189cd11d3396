mod device;
mod error;
mod label;
mod layout;
mod ptype;
mod report;
mod scan;

use std::{io, path::PathBuf, process::ExitCode};

use clap::Parser;

/// Shows the disklabel and the primary MBR partition table of a disk image.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Disk image or block device
    image: PathBuf,
    /// Reserved, accepted and ignored
    device: Option<String>,
    /// Also print the CHS start and end of each partition
    #[arg(short, long)]
    geometry: bool,
    /// Print read diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = scan::Config {
        verbose: args.verbose,
        geometry: args.geometry,
    };
    if let (true, Some(dev)) = (args.verbose, &args.device) {
        eprintln!("[main] device `{dev}` is reserved, ignoring");
    }

    match scan::run(&args.image, &config, &mut io::stdout().lock()) {
        Ok(scan) => {
            if args.verbose {
                eprintln!(
                    "[main] {}: {} label, {} partition(s)",
                    args.image.display(),
                    scan.label,
                    scan.mbr.partitions().count()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

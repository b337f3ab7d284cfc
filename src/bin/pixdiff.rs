use std::env;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Result};
use pixdiff::{diff_images, load_image, save_image, simd_available, DiffMode};

const USAGE: &str = "Usage: pixdiff <image1> <image2> <output.{png,rgba}> \
                     [absolute|abs|saturated|sat|modular|mod] [disable_simd]";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!("Exiting due to failure.");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 || args.len() > 6 {
        bail!("{USAGE}");
    }

    let mut mode = DiffMode::default();
    let mut use_simd = true;

    if let Some(arg) = args.get(4) {
        if arg == "disable_simd" {
            use_simd = false;
            // Nothing may follow the flag.
            if let Some(extra) = args.get(5) {
                bail!("Invalid argument '{extra}' after '{arg}'.\n{USAGE}");
            }
        } else {
            mode = arg.parse()?;
        }
    }
    if let Some(arg) = args.get(5) {
        if arg == "disable_simd" {
            use_simd = false;
        } else {
            bail!("Invalid argument '{arg}'.\n{USAGE}");
        }
    }

    let mut image1 = load_image(Path::new(&args[1]))?;
    let image2 = load_image(Path::new(&args[2]))?;

    if use_simd && simd_available() {
        println!("Using SIMD differencing.");
    } else if use_simd {
        println!("Using scalar differencing. (No SIMD support on this target.)");
    } else {
        println!("Using scalar differencing. SIMD differencing disabled.");
    }

    diff_images(&mut image1, &image2, mode, use_simd)?;
    save_image(Path::new(&args[3]), &image1)?;

    Ok(())
}

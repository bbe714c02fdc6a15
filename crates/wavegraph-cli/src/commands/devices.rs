//! Audio output device listing.

use wavegraph_io::list_output_devices;

pub fn run() -> anyhow::Result<()> {
    let devices = list_output_devices()?;

    if devices.is_empty() {
        println!("No audio output devices found.");
        return Ok(());
    }

    println!("Output Devices:");
    for (idx, name) in devices.iter().enumerate() {
        println!("  [{idx}] {name}");
    }

    println!();
    println!("Tip: Use device index or partial name with --device:");
    println!("  wavegraph play tone.wav --device 0");
    println!("  wavegraph play tone.wav --device \"USB\"");

    Ok(())
}

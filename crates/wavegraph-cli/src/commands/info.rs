//! Display WAV file header.

use super::common::format_bytes;
use clap::Args;
use wavegraph_io::WaveFile;

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: std::path::PathBuf,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let wave = WaveFile::open(&args.file)?;
    let header = wave.header();
    let samples = wave.data().len() / usize::from(wave.block_align().max(1));

    println!("File:        {}", args.file.display());
    println!("Format:      PCM {}-bit", header.bits_per_sample);
    println!("Channels:    {}", header.channels);
    println!("Sample Rate: {} Hz", header.sample_rate);
    println!("Byte Rate:   {} B/s", header.byte_rate);
    println!("Block Align: {}", header.block_align);
    println!(
        "Duration:    {:.3}s ({} samples)",
        wave.duration_secs(),
        samples
    );
    println!("Data Size:   {}", format_bytes(u64::from(header.data_size)));

    let file_size = std::fs::metadata(&args.file)?.len();
    println!("File Size:   {}", format_bytes(file_size));

    Ok(())
}

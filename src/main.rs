mod player;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

use sound_out::{DeviceFormat, SoundConfig, SoundMode, SoundOut, Token};

use crate::player::buffer::create_sample_queue;
use crate::player::decoder::FileSource;
use crate::player::feeder::{Feeder, LOW_WATER};
use crate::player::pcm_sink::PcmSink;
use crate::player::tone::ToneSource;
use crate::player::SampleSource;

#[derive(Parser)]
#[command(name = "sound_out")]
#[command(about = "Play a file or a test tone through the sound output layer")]
#[command(version)]
struct Cli {
    /// Audio file to play. A sine tone is played when omitted.
    file: Option<PathBuf>,

    /// Sample rate of the test tone (files play at their own rate)
    #[arg(long, default_value = "44100")]
    rate: u32,

    /// Bits per sample (8 or 16)
    #[arg(long, default_value = "16")]
    bits: u16,

    /// Channels of the test tone (files play with their own layout)
    #[arg(long, default_value = "2")]
    channels: u16,

    /// Current buffer time hint in milliseconds
    #[arg(long, default_value = "100")]
    buffer_ms: u32,

    /// Maximum buffer time hint in milliseconds; also sizes the sample queue
    #[arg(long, default_value = "500")]
    max_buffer_ms: u32,

    /// Stop after this many seconds
    #[arg(long, default_value = "5")]
    seconds: u64,

    /// Test tone frequency in Hz
    #[arg(long, default_value = "440")]
    frequency: f32,

    /// Pause for half a second at this many seconds in
    #[arg(long)]
    pause_at: Option<u64>,

    /// Do not open a sound device
    #[arg(long, env = "NOSOUND")]
    nosound: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sound_out=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let source: Box<dyn SampleSource> = match &cli.file {
        Some(path) => Box::new(FileSource::open(path)?),
        None => Box::new(ToneSource::new(cli.rate, cli.channels, cli.frequency)),
    };

    if let Some(duration) = source.duration() {
        info!("source length {:.2} seconds", duration);
    }

    let mode = SoundMode::new(source.sample_rate(), cli.bits, source.channels())
        .with_buffer_times(cli.buffer_ms, cli.max_buffer_ms);
    let format = DeviceFormat::try_from(&mode).context("cannot play this source")?;

    let capacity = (format.sample_rate as u64 * format.channels as u64 * cli.max_buffer_ms as u64 / 1000) as usize;
    let capacity = capacity.max(LOW_WATER * 2);
    let (producer, consumer) = create_sample_queue(capacity);

    let sink = PcmSink::new(consumer, format.sample_format);
    let underruns = sink.underruns();

    let mut out = SoundOut::with_default_host(SoundConfig { no_sound: cli.nosound });
    out.configure(mode, sink, Token(0))
        .context("could not open sound output")?;

    let mut feeder = Feeder::spawn(source, producer);
    let started = Instant::now();
    let limit = Duration::from_secs(cli.seconds);
    let mut pause_at = cli.pause_at.map(Duration::from_secs);

    while started.elapsed() < limit && !feeder.is_finished() {
        if pause_at.is_some_and(|at| started.elapsed() >= at) {
            pause_at = None;
            out.pause()?;
            info!(paused = out.is_paused(), "paused");
            thread::sleep(Duration::from_millis(500));
            out.resume()?;
            info!(paused = out.is_paused(), "resumed");
        }
        out.pump()?;
        thread::sleep(Duration::from_millis(50));
    }

    if feeder.is_finished() {
        // Let the queue drain before closing.
        thread::sleep(Duration::from_millis(cli.max_buffer_ms as u64));
    }

    let healthy = out.is_healthy();
    feeder.stop();
    out.teardown();

    info!(
        healthy,
        underruns = underruns.load(Ordering::Relaxed),
        "playback finished"
    );
    Ok(())
}

use anyhow::Result;
use clap::Parser;
use talklens::{AnalysisClient, CaptureController, Config, MicRecorder, SessionDriver};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "talklens", about = "Record speech and track analysis results over time")]
struct Cli {
    /// Config file (optional; defaults apply without one)
    #[arg(long, default_value = "config/talklens")]
    config: String,

    /// Analysis service base URL (overrides config)
    #[arg(long)]
    server: Option<String>,

    /// Record once for this many seconds instead of running interactively
    #[arg(long)]
    duration: Option<u64>,
}

// Single-threaded cooperative scheduling: one logical thread of control,
// suspension only at the I/O boundaries.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;
    let base_url = cli.server.unwrap_or(cfg.backend.base_url);

    info!("{} starting", cfg.service.name);
    info!("Analysis service: {}", base_url);

    let recorder = MicRecorder::new(&cfg.audio.recordings_path)?;
    let controller = CaptureController::new(Box::new(recorder));
    let client = AnalysisClient::new(base_url);
    let mut driver = SessionDriver::new(controller, Box::new(client));

    match cli.duration {
        Some(secs) => record_once(&mut driver, secs).await?,
        None => interactive(&mut driver).await?,
    }

    Ok(())
}

async fn record_once(driver: &mut SessionDriver, secs: u64) -> Result<()> {
    driver.start_recording()?;
    tokio::time::sleep(std::time::Duration::from_secs(secs)).await;
    driver.stop_and_analyze().await?;
    print_view(driver);
    Ok(())
}

async fn interactive(driver: &mut SessionDriver) -> Result<()> {
    println!("Press Enter to start/stop recording, q to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "q" {
            break;
        }

        if driver.is_recording() {
            match driver.stop_and_analyze().await {
                Ok(_) => print_view(driver),
                Err(e) => error!("Recording failed: {:#}", e),
            }
            println!("Press Enter to record again, q to quit.");
        } else {
            match driver.start_recording() {
                Ok(()) => println!("Recording... press Enter to stop."),
                Err(e) => error!("Could not start recording: {}", e),
            }
        }
    }

    Ok(())
}

/// Terminal rendering of the current-session view and progress series.
fn print_view(driver: &SessionDriver) {
    let current = driver.aggregator().current();

    if let Some(text) = &current.transcription {
        println!("\nTranscription:\n{}", text);
    }
    if let Some(pauses) = &current.pause_info {
        println!("Pauses: {} {:?}", pauses.num_pauses, pauses.pause_lengths);
    }
    if let Some(fillers) = &current.filler_info {
        println!(
            "Filler words: {} {:?}",
            fillers.filler_count, fillers.filler_words
        );
    }
    if let Some(wpm) = &current.wpm_info {
        println!(
            "Pace: {:.0} wpm ({} words in {:.1}s)",
            wpm.wpm, wpm.total_words, wpm.duration_seconds
        );
    }
    if let Some(view) = driver.aggregator().emotion_view() {
        print!("Emotion:");
        for score in &view.scores {
            print!(" {} {} {:.2}", score.glyph, score.label, score.probability);
        }
        println!("  -> dominant: {}", view.dominant);
    } else if let Some(info) = &current.emotion_info {
        if let Some(emotion) = &info.emotion {
            println!("Emotion: {}", emotion);
        }
    }
    if let Some(topic) = &current.topic_analysis {
        println!("Topic: {}", topic);
    }
    if let Some(categories) = &current.categories {
        for (name, insight) in [
            ("Inattention", &categories.inattention),
            ("Hyperactivity", &categories.hyperactivity),
            ("Impulsivity", &categories.impulsivity),
        ] {
            if let Some(insight) = insight {
                println!("{}: {} | {}", name, insight.insights, insight.recommendations);
            }
        }
    }

    let series = driver.aggregator().series();
    if !series.is_empty() {
        let last = series.len() - 1;
        println!(
            "Progress ({} recordings): fillers={} pauses={} wpm={:.0}",
            series.len(),
            series.filler_counts[last],
            series.pause_counts[last],
            series.wpm[last]
        );
    }

    println!("History: {} recordings on the server", driver.history().len());
}

use std::path::PathBuf;

use anyhow::Context;
use uuid::Uuid;

use sales_voice::config;
use sales_voice::logger::ConsoleLogger;
use sales_voice::pipeline::{TurnOutcome, VoicePipeline};
use sales_voice::session::SessionContext;

// Runs a single voice turn from a recorded file instead of the browser, handy
// for trying prompt changes without clicking through the page.
//
//     replay_turn sample.webm [reply.mp3]
//
// The reply can be played back using
//     ffplay -autoexit reply.mp3

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install the rustls crypto provider"))?;

    let mut args = std::env::args_os().skip(1);
    let input = args
        .next()
        .map(PathBuf::from)
        .context("usage: replay_turn <audio-file> [output.mp3]")?;
    let output = args.next().map_or_else(|| PathBuf::from("reply.mp3"), PathBuf::from);

    let config = config::load()?;
    let logger = ConsoleLogger::shared(config.log_level);
    let pipeline = VoicePipeline::from_config(&config, logger)?;

    let audio = tokio::fs::read(&input)
        .await
        .context(format!("Could not read {}", input.display()))?;

    let mut session = SessionContext::new(Uuid::new_v4());
    match pipeline.run_turn(&mut session, &audio).await? {
        TurnOutcome::Completed(turn) => {
            println!("You said:  {}", turn.transcript);
            println!("Emotion:   {}", turn.emotion);
            println!("Mia:       {}", turn.reply);

            tokio::fs::write(&output, &turn.audio.audio)
                .await
                .context(format!("Could not write {}", output.display()))?;
            println!("Reply audio written to {}", output.display());
        }
        TurnOutcome::LimitReached { warning } => println!("{warning}"),
    }

    Ok(())
}

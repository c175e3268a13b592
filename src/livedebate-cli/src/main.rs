//! LiveDebate CLI - AI Voice Debate Tool
//!
//! A command-line tool for generating spoken PRO/CON debate turns from
//! hosted conversational agents, with a cloud TTS test mode.

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use livedebate_core::{
    AgentTurnClient, AudioEncoding, AudioResult, Env, SpeechSynthesizer, SynthesisRequest,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "livedebate",
    version,
    about = "AI Voice Debate Tool - generate spoken PRO/CON debate turns",
    long_about = "A CLI tool for producing spoken debate turns from hosted conversational \
                  agents, checking the provider API key, and testing cloud text-to-speech."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show which connection environment variables are set
    Status,

    /// Validate the ElevenLabs API key and print the account info
    CheckKey,

    /// Run a single PRO agent turn with a short greeting to verify audio returns
    HelloTest {
        /// Where to write the returned MP3
        #[arg(long, default_value = "hello.mp3", value_name = "FILE")]
        out: PathBuf,
    },

    /// Generate a PRO opening then a CON rebuttal for a topic
    Debate {
        /// The topic to debate
        #[arg(value_name = "TOPIC")]
        topic: String,

        /// Debate round
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=3))]
        round: u32,

        /// Timer minutes (displayed only)
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=3))]
        minutes: u32,

        /// Directory for pro.mp3 and con.mp3
        #[arg(long, default_value = ".", value_name = "DIR")]
        out_dir: PathBuf,
    },

    /// Synthesize a sample through Google Cloud Text-to-Speech
    TtsTest {
        /// Text to synthesize
        #[arg(long, default_value = "Hello from Google Cloud Text to Speech")]
        text: String,

        /// Voice name (e.g., en-US-Standard-A)
        #[arg(long, default_value = "en-US-Standard-A")]
        voice: String,

        /// Speaking rate
        #[arg(long)]
        rate: Option<f64>,

        /// Voice pitch
        #[arg(long)]
        pitch: Option<f64>,

        /// Output encoding
        #[arg(long, value_enum, default_value_t = EncodingArg::Mp3)]
        encoding: EncodingArg,

        /// Where to write the synthesized audio
        #[arg(long, default_value = "tts.mp3", value_name = "FILE")]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EncodingArg {
    Mp3,
    OggOpus,
    Linear16,
}

impl From<EncodingArg> for AudioEncoding {
    fn from(value: EncodingArg) -> Self {
        match value {
            EncodingArg::Mp3 => AudioEncoding::Mp3,
            EncodingArg::OggOpus => AudioEncoding::OggOpus,
            EncodingArg::Linear16 => AudioEncoding::Linear16,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let env = Env::from_env();

    match cli.command {
        Command::Status => run_status(&env),
        Command::CheckKey => run_check_key(&env).await?,
        Command::HelloTest { out } => run_hello_test(&env, &out).await?,
        Command::Debate {
            topic,
            round,
            minutes,
            out_dir,
        } => run_debate(&env, &topic, round, minutes, &out_dir).await?,
        Command::TtsTest {
            text,
            voice,
            rate,
            pitch,
            encoding,
            out,
        } => run_tts_test(&text, &voice, rate, pitch, encoding.into(), &out).await?,
    }

    Ok(())
}

/// Connection status report: which provider variables are set.
fn run_status(env: &Env) {
    println!("{}", "Connection status:".bold());
    for (name, set) in env.status() {
        if set {
            println!("  {} {}", name.bright_cyan(), "set".bright_green());
        } else {
            println!("  {} {}", name.bright_cyan(), "missing".red());
        }
    }
    if env.api_key.is_empty() {
        eprintln!(
            "{}",
            "Warning: Set ELEVENLABS_API_KEY in your environment before running.".yellow()
        );
    }
}

async fn run_check_key(env: &Env) -> Result<(), Box<dyn std::error::Error>> {
    let api_key = env.require_api_key()?;
    let client = AgentTurnClient::new(api_key);

    let info = client.check_api_key().await?;
    println!("{}", "API key is valid.".bright_green().bold());
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

/// Runs a single PRO agent turn with a short greeting to verify audio returns.
async fn run_hello_test(env: &Env, out: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (api_key, agent_pro) = env.require_pro()?;
    let client = AgentTurnClient::new(api_key);

    println!("{}", "Calling PRO agent…".bright_cyan());
    let audio = client
        .produce_turn_audio(agent_pro, "Please greet the audience in one short sentence.")
        .await?;

    save_audio(out, &audio)?;
    println!("{}", "Received audio from PRO agent".bright_green());
    print_audio_caption(&audio, out);
    Ok(())
}

/// The Generate button: PRO opening, brief pause, then CON rebuttal.
/// A failed PRO turn is reported but does not suppress the CON attempt.
async fn run_debate(
    env: &Env,
    topic: &str,
    round: u32,
    minutes: u32,
    out_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let (api_key, agent_pro, agent_con) = env.require_all()?;
    let client = AgentTurnClient::new(api_key);

    println!();
    println!("{}", "═".repeat(70).bright_blue());
    println!(
        "{}",
        format!("  {} - Round {} ({} minute timer)", "LiveDebate".bold(), round, minutes)
            .bright_blue()
            .bold()
    );
    println!("{}", "═".repeat(70).bright_blue());
    println!();
    println!("{} {}", "Topic:".bold(), topic.bright_white());
    println!();

    let mut failed = false;

    println!("{}", "Generating PRO opening…".bright_cyan());
    let text_pro = format!("Opening for Round {round} on {topic}");
    let pro_path = out_dir.join("pro.mp3");
    match client.produce_turn_audio(agent_pro, &text_pro).await {
        Ok(audio) => {
            save_audio(&pro_path, &audio)?;
            print_audio_caption(&audio, &pro_path);
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            failed = true;
        }
    }

    tokio::time::sleep(Duration::from_millis(300)).await;

    println!("{}", "Generating CON rebuttal…".bright_magenta());
    let text_con = format!("Rebuttal for Round {round} on {topic}");
    let con_path = out_dir.join("con.mp3");
    match client.produce_turn_audio(agent_con, &text_con).await {
        Ok(audio) => {
            save_audio(&con_path, &audio)?;
            print_audio_caption(&audio, &con_path);
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            failed = true;
        }
    }

    if failed {
        return Err("one or more debate turns failed".into());
    }

    println!();
    println!("{}", "  Debate turn pair complete.".bright_green().bold());
    Ok(())
}

async fn run_tts_test(
    text: &str,
    voice: &str,
    rate: Option<f64>,
    pitch: Option<f64>,
    encoding: AudioEncoding,
    out: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut request = SynthesisRequest::new(text)
        .with_voice(voice)
        .with_encoding(encoding);
    if let Some(rate) = rate {
        request = request.with_speaking_rate(rate);
    }
    if let Some(pitch) = pitch {
        request = request.with_pitch(pitch);
    }

    let synthesizer = SpeechSynthesizer::new();
    match synthesizer.synthesize(&request).await {
        Ok(bytes) => {
            fs::write(out, &bytes)?;
            println!("{}", "Received audio from Google TTS".bright_green());
            println!("  {}", format!("{} bytes saved to {}", bytes.len(), out.display()).dimmed());
            Ok(())
        }
        Err(_) => Err("Google TTS failed. Ensure GOOGLE_APPLICATION_CREDENTIALS or \
             GOOGLE_APPLICATION_CREDENTIALS_JSON is set."
            .into()),
    }
}

fn save_audio(path: &Path, audio: &AudioResult) -> std::io::Result<()> {
    fs::write(path, &audio.bytes)
}

fn print_audio_caption(audio: &AudioResult, path: &Path) {
    println!(
        "  {}",
        format!(
            "audio: content-type={}, bytes={}, saved to {}",
            audio.content_type,
            audio.bytes.len(),
            path.display()
        )
        .dimmed()
    );
}

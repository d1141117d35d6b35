use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;
use tracing::{error, info, warn};

use media_transcriber::format::{FormatDispatcher, OutputFormat, RenderedOutput};
use media_transcriber::transcription::TranscriptionClient;
use media_transcriber::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "media_transcriber=info,warn".into()),
        )
        .init();

    let matches = Command::new("transcriber")
        .version("0.1.0")
        .about("Transcribe audio/video files and render the transcript")
        .arg(
            Arg::new("inputs")
                .value_name("FILE")
                .help("Audio or video files to transcribe")
                .num_args(1..)
                .required(true),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format: text, markdown, srt, script, complete")
                .default_value("text"),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Write rendered output files here instead of stdout"),
        )
        .arg(
            Arg::new("language")
                .short('l')
                .long("language")
                .value_name("CODE")
                .help("Language hint for the recognition service"),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .value_name("KEY")
                .help("API key for the recognition service"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Recognition model identifier"),
        )
        .arg(
            Arg::new("timestamps")
                .short('t')
                .long("timestamps")
                .help("Request per-segment timing even for plain text output")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-summary")
                .long("no-summary")
                .help("Skip the extractive summary in complete output")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let inputs: Vec<PathBuf> = matches
        .get_many::<String>("inputs")
        .unwrap()
        .map(PathBuf::from)
        .collect();
    let format: OutputFormat = matches
        .get_one::<String>("format")
        .unwrap()
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    // Load configuration, then apply CLI overrides
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    if let Some(api_key) = matches.get_one::<String>("api-key") {
        config.whisper.api_key = Some(api_key.clone());
    }
    if let Some(language) = matches.get_one::<String>("language") {
        config.whisper.language = Some(language.clone());
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config.whisper.model = model.clone();
    }
    if matches.get_flag("no-summary") {
        config.format.include_summary = false;
    }
    config.validate()?;

    // Every format except plain text consumes segment timing
    let verbose = matches.get_flag("timestamps") || format != OutputFormat::Text;

    let output_dir = matches.get_one::<String>("output-dir").map(PathBuf::from);
    if let Some(dir) = &output_dir {
        tokio::fs::create_dir_all(dir).await?;
    }

    let client = TranscriptionClient::new(config.whisper.clone(), config.audio.clone());
    let dispatcher = FormatDispatcher::new(config.format.clone());

    info!("Transcribing {} file(s)", inputs.len());
    let items = client.transcribe_multiple(&inputs, verbose).await;

    let mut failed = 0usize;
    for item in &items {
        let result = match &item.outcome {
            Ok(result) => result,
            Err(e) => {
                error!("{}: {}", item.path.display(), e);
                failed += 1;
                continue;
            }
        };

        let rendered = dispatcher.render(result, format);
        let content = render_to_string(&rendered)?;

        match &output_dir {
            Some(dir) => {
                let stem = item
                    .path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "transcript".to_string());
                let out_path = dir.join(format!("{}.{}", stem, output_extension(format)));
                tokio::fs::write(&out_path, &content).await?;
                info!("Wrote {}", out_path.display());
            }
            None => println!("{}", content),
        }
    }

    info!(
        "Done: {} succeeded, {} failed",
        items.len() - failed,
        failed
    );

    if failed == items.len() && !items.is_empty() {
        anyhow::bail!("all inputs failed to transcribe");
    }

    Ok(())
}

fn render_to_string(rendered: &RenderedOutput) -> Result<String> {
    Ok(match rendered {
        RenderedOutput::Text(text) => text.clone(),
        RenderedOutput::Script(entries) => serde_json::to_string_pretty(entries)?,
        RenderedOutput::Complete(transcript) => serde_json::to_string_pretty(transcript)?,
    })
}

fn output_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Markdown => "md",
        OutputFormat::Srt => "srt",
        OutputFormat::Script | OutputFormat::Complete => "json",
    }
}

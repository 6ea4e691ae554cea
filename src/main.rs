use transcue::parser;
use transcue::processor::{self, ProcessOpts};
use transcue::serialiser::{self, Format};
use transcue::sync;

use std::io::{self, Read};

use anyhow::{anyhow, Context, Result};
use clap::{Parser as ClapParser, ValueEnum};

fn main() {
    env_logger::init();

    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Vtt,
    Srt,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Vtt => Format::Vtt,
            OutputFormat::Srt => Format::Srt,
            OutputFormat::Json => Format::Json,
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Turn timestamped transcripts into subtitle cues")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The transcript to read from. If not supplied, it will be read from standard input.",
        default_value = "-"
    )]
    input: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to write to. If not supplied, the cues will be written to standard output.",
        default_value = "-"
    )]
    output: String,
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        help = "Total duration of the media, used as the end of the last cue.",
        allow_negative_numbers = true
    )]
    duration: f64,
    #[arg(short, long, value_enum, default_value = "vtt", help = "Output format.")]
    format: OutputFormat,
    #[arg(long, help = "Remove bracketed annotations such as [laughs] from the cue text.")]
    strip_annotations: bool,
    #[arg(long, help = "Leave out cues without any text.")]
    drop_empty: bool,
    #[arg(
        long,
        value_name = "SECONDS",
        help = "Print the cue active at the given playback position instead of exporting."
    )]
    at: Option<f64>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let duration = parser::validate_duration(cli.duration)?;

    let data = if cli.input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&cli.input)
            .context(format!("Failed to open input file: '{}'", cli.input))?
    };

    let segs = parser::parse(&data, duration);
    if segs.is_empty() {
        return Err(anyhow!(
            "No timestamped lines found in '{}'. Is this a transcript?",
            cli.input
        ));
    }
    log::info!("Read {} segments from '{}'", segs.len(), cli.input);

    if let Some(position) = cli.at {
        match sync::active_index(&segs, position) {
            Some(i) => println!("{}\t{}", i + 1, segs[i].text),
            None => println!("No cue active at {:.3}s", position),
        }
        return Ok(());
    }

    let opts = ProcessOpts {
        strip_annotations: cli.strip_annotations,
        drop_empty: cli.drop_empty,
    };
    let segs = processor::process(segs, &opts)?;

    if cli.output == "-" {
        serialiser::serialise(&segs, cli.format.into(), io::stdout())?;
    } else {
        let dst = std::fs::File::create(&cli.output)
            .context(format!("Failed to create output file: '{}'", cli.output))?;
        serialiser::serialise(&segs, cli.format.into(), dst)
            .context(format!("Failed to write to output file: '{}'", cli.output))?;
    };

    Ok(())
}

use anyhow::Result;
use clap::Parser;
use reconocimiento::{
    app::App,
    capture::CommandCamera,
    permissions,
    speech::{CommandSpeaker, SilentSpeaker, Speaker, SpeechConfig},
};
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

/// Cliente de reconocimiento de imágenes: toma una foto, la envía al
/// servidor de clasificación y lee el resultado en voz alta.
#[derive(Parser, Debug)]
#[command(name = "reconocimiento", version)]
struct Args {
    /// IP del servidor
    #[arg(long)]
    host: Option<String>,

    /// Puerto del servidor
    #[arg(long)]
    port: Option<String>,

    /// Capture command; `{output}` is replaced with the JPEG path to write
    #[arg(long, default_value = "libcamera-still -n -q 50 -o {output}")]
    camera_cmd: String,

    /// Camera device probed for access at startup
    #[arg(long, default_value = "/dev/video0")]
    camera_device: PathBuf,

    /// Speech synthesizer command
    #[arg(long, default_value = "espeak-ng")]
    speech_cmd: String,

    /// Speech language
    #[arg(long, default_value = "es-ES")]
    language: String,

    /// Speech rate relative to the engine default
    #[arg(long, default_value_t = 0.5)]
    rate: f64,

    /// Disable speech output
    #[arg(long)]
    no_speech: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    // Access probe only; no capture is triggered at startup. Denial is not
    // fatal, later captures just fail at the OS level.
    if let Err(e) = permissions::check_camera_access(&args.camera_device) {
        warn!("{e}");
    }

    let speaker: Box<dyn Speaker> = if args.no_speech {
        Box::new(SilentSpeaker)
    } else {
        Box::new(CommandSpeaker::new(SpeechConfig {
            command: args.speech_cmd,
            language: args.language,
            rate: args.rate,
        }))
    };

    let camera = CommandCamera::new(args.camera_cmd)?;
    let mut app = App::new(Box::new(camera), speaker)?;
    if let Some(host) = args.host.as_deref() {
        app.set_host(host);
    }
    if let Some(port) = args.port.as_deref() {
        app.set_port(port);
    }

    println!("Reconocimiento de Imágenes");
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("host") => app.set_host(parts.next().unwrap_or("")),
            Some("port") => app.set_port(parts.next().unwrap_or("")),
            Some("capture") | Some("foto") => {
                if let Err(e) = app.capture().await {
                    eprintln!("Error: {e}");
                }
            }
            Some("classify") | Some("clasificar") => {
                if let Err(e) = app.classify().await {
                    eprintln!("Error: {e}");
                }
            }
            Some("show") => {
                let endpoint = &app.session.endpoint;
                println!("Servidor: http://{}:{}", endpoint.host, endpoint.port);
                match &app.session.image {
                    Some(image) => println!("Foto: {}", image.local_uri.display()),
                    None => println!("Foto: (ninguna)"),
                }
                let rows = reconocimiento::present::render_rows(&app.session.predictions);
                if !rows.is_empty() {
                    println!("{rows}");
                }
            }
            Some("quit") | Some("exit") => break,
            None => {}
            _ => print_help(),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Comandos: host <ip> | port <puerto> | capture | classify | show | quit");
}

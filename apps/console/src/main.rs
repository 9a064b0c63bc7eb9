use anyhow::Result;
use clap::Parser;
use panel_core::{voice::UnsupportedSpeechCapability, PanelClient, PanelEvent};
use storage::{prepare_database_url, Storage};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::debug;

mod config;

/// Preset quick commands, the console's stand-in for the panel's command
/// buttons.
const QUICK_COMMANDS: &[&str] = &[
    "ligar luz",
    "desligar luz",
    "abrir navegador",
    "que horas são",
];

#[derive(Parser, Debug)]
#[command(about = "Console view for the remote command panel")]
struct Args {
    /// Override the sqlite database url from panel.toml / environment.
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(url) = args.database_url {
        settings.database_url = url;
    }
    let database_url = prepare_database_url(&settings.database_url)?;
    debug!(%database_url, "opening settings store");
    let storage = Storage::new(&database_url).await?;

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut client = PanelClient::new(storage, events_tx).await?;

    if let Some(address) = client.saved_address() {
        println!("Last server address: {address}");
    }
    println!(
        "connect <ip> | disconnect | quick <n> | commands | voice | log | status | quit"
    );
    println!("Anything else is sent to the server as a command.");

    // Mirror panel events to the terminal as they arrive.
    tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            match event {
                PanelEvent::StatusChanged(status) => {
                    let led = if status.led_on() { "●" } else { "○" };
                    println!("{led} {} [{}]", status.label(), status.connect_button_label());
                }
                PanelEvent::Log(entry) => println!("{entry}"),
                PanelEvent::Alert(message) => println!("!! {message}"),
                PanelEvent::ListeningChanged(listening) => {
                    println!("{}", if listening { "Listening..." } else { "Tap to speak" });
                }
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb {
            "quit" | "exit" => break,
            "connect" => {
                client.connect(rest).await;
            }
            "disconnect" => client.disconnect(),
            "status" => {
                let status = client.status();
                println!(
                    "{} (controls {})",
                    status.label(),
                    if status.controls_enabled() {
                        "enabled"
                    } else {
                        "disabled"
                    }
                );
            }
            "log" => {
                for entry in client.log() {
                    println!("{entry}");
                }
            }
            "commands" => {
                for (index, command) in QUICK_COMMANDS.iter().enumerate() {
                    println!("{}. {command}", index + 1);
                }
            }
            "quick" => match rest.parse::<usize>() {
                Ok(n) if (1..=QUICK_COMMANDS.len()).contains(&n) => {
                    client.send(QUICK_COMMANDS[n - 1]).await;
                }
                _ => println!("usage: quick <1..{}>", QUICK_COMMANDS.len()),
            },
            "voice" => {
                client.dictate(&UnsupportedSpeechCapability).await;
            }
            // Free-text input goes straight to the dispatcher.
            _ => {
                client.send(line).await;
            }
        }
    }

    Ok(())
}

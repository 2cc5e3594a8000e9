use clap::Parser;

use causerie::api::ChatClient;
use causerie::core::config::Config;
use causerie::logging::{self, LoggingState};
use causerie::ui::chat_loop::run_chat;

#[derive(Parser)]
#[command(name = "causerie")]
#[command(about = "A terminal chat interface for a local AI inference endpoint")]
#[command(long_about = "Causerie is a full-screen terminal chat interface that relays each \
message to a local inference endpoint and shows the reply inline.\n\n\
Environment Variables:\n\
  CAUSERIE_ENDPOINT     Chat endpoint URL (overrides the config file)\n\
  CAUSERIE_DEBUG_LOG    File for internal diagnostics (with RUST_LOG)\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Up/Down/Mouse     Scroll through chat history\n\
  Esc               Leave the chat\n\
  Ctrl+C            Quit")]
struct Args {
    #[arg(short, long, help = "Chat endpoint URL")]
    endpoint: Option<String>,

    #[arg(short, long, help = "Append the transcript to this file")]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init_tracing();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: could not read config file: {e}");
        Config::default()
    });

    let endpoint = config.resolve_endpoint(args.endpoint);
    let log_file = args.log_file.or(config.log_file);

    let logging = match LoggingState::new(log_file) {
        Ok(logging) => logging,
        Err(e) => {
            eprintln!("Error: cannot open log file: {e}");
            std::process::exit(1);
        }
    };

    run_chat(ChatClient::new(endpoint), logging).await
}

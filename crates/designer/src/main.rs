//! Headless container designer.
//!
//! Reads one JSON command per line from stdin and writes one JSON response per
//! line to stdout. Logs go to stderr.

use container_designer_lib::client::{DesignClient, DEFAULT_API_URL};
use container_designer_lib::command::{execute_json, CommandResponse};
use container_designer_lib::session::Session;
use container_designer_lib::state::DesignState;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

struct Args {
    server: String,
    autosave: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        server: std::env::var("DESIGNER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        autosave: false,
    };

    let argv: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--server" if i + 1 < argv.len() => {
                args.server = argv[i + 1].clone();
                i += 1;
            }
            "--autosave" => args.autosave = true,
            other => tracing::warn!("Ignoring unknown argument: {other}"),
        }
        i += 1;
    }
    args
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "container_designer=info,container_designer_lib=info".into()),
        )
        .init();

    let args = parse_args();
    let mut session = Session::with_client(DesignClient::new(&args.server));
    tracing::info!(server = %args.server, "designer ready");

    if args.autosave && DesignState::has_autosave() {
        if let Some(design) = DesignState::load_autosave() {
            tracing::info!(name = %design.name, "restored autosave");
            session.state.load_design(&design);
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read stdin: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let version = session.state.version();
        let response = execute_json(&mut session, &line)
            .await
            .unwrap_or_else(CommandResponse::err);

        if args.autosave && session.state.version() != version {
            session.state.autosave();
        }

        let mut out = match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to encode response: {e}");
                continue;
            }
        };
        out.push('\n');
        if let Err(e) = stdout.write_all(out.as_bytes()).await {
            tracing::error!("Failed to write stdout: {e}");
            break;
        }
        let _ = stdout.flush().await;
    }
}

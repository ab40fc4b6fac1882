//! Interactive front end: each input line is typed into the URL field and
//! the parse button is pressed.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinError, JoinHandle};
use tracing_subscriber::EnvFilter;

use recipe_reformat::{
    api::models::Recipe,
    app::{App, Notice},
    client::ParseClient,
    config::ClientConfig,
    error::ClientError,
    view::render,
};

type InFlight = JoinHandle<Result<Recipe, ClientError>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::load()?;
    let client = ParseClient::new(config.parse_endpoint);
    let mut app = App::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: Option<InFlight> = None;
    let mut input_closed = false;

    print!("{}", render(&app));

    loop {
        tokio::select! {
            line = lines.next_line(), if !input_closed => {
                let Some(line) = line? else {
                    input_closed = true;
                    if in_flight.is_none() {
                        break;
                    }
                    continue;
                };

                app.set_url(line);
                match app.begin_parse() {
                    Ok(Some(url)) => {
                        let client = client.clone();
                        in_flight = Some(tokio::spawn(async move { client.parse_website(&url).await }));
                    }
                    Ok(None) => {}
                    Err(notice) => alert(&notice),
                }
                print!("{}", render(&app));
            }
            Some(joined) = wait(&mut in_flight), if in_flight.is_some() => {
                in_flight = None;
                let outcome = joined.unwrap_or_else(|e| {
                    tracing::error!(error = %e, "parse task failed");
                    Err(ClientError::ParseFailed)
                });
                if let Err(notice) = app.finish_parse(outcome) {
                    alert(&notice);
                }
                print!("{}", render(&app));
                if input_closed {
                    break;
                }
            }
            else => break,
        }
    }

    Ok(())
}

async fn wait(slot: &mut Option<InFlight>) -> Option<Result<Result<Recipe, ClientError>, JoinError>> {
    match slot {
        Some(handle) => Some(handle.await),
        None => None,
    }
}

fn alert(notice: &Notice) {
    println!("\n!! {notice}\n");
}

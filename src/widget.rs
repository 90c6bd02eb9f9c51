//! Terminal front end for the controller
//!
//! Each input line is a search submission. `/here` asks for the device
//! position and `/quit` (or end of input) leaves.

use crate::controller::InputController;
use crate::geolocation::Geolocator;
use crate::weather::WeatherSource;
use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const PROMPT: &str = "city (or /here, /quit)> ";

#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Search(&'a str),
    Locate,
    Quit,
}

#[must_use]
pub fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        "/here" | "/locate" => Command::Locate,
        "/quit" | "/exit" => Command::Quit,
        // blank lines still count as submissions
        _ => Command::Search(line),
    }
}

/// Run the widget on stdin/stdout
pub async fn run<S: WeatherSource, G: Geolocator>(controller: InputController<S, G>) -> Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run_with(controller, stdin, tokio::io::stdout()).await
}

pub async fn run_with<S, G, R, W>(
    mut controller: InputController<S, G>,
    input: R,
    mut output: W,
) -> Result<()>
where
    S: WeatherSource,
    G: Geolocator,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    controller.start().await;
    show(&controller, &mut output).await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Quit => break,
            Command::Locate => controller.use_my_location().await,
            Command::Search(text) => controller.submit_search(text).await,
        }
        show(&controller, &mut output).await?;
    }

    output.flush().await?;
    Ok(())
}

async fn show<S, G, W>(controller: &InputController<S, G>, output: &mut W) -> Result<()>
where
    S: WeatherSource,
    G: Geolocator,
    W: AsyncWrite + Unpin,
{
    let text = format!("{}\n{PROMPT}", controller.view());
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("Paris"), Command::Search("Paris"));
        assert_eq!(parse_command(" /here "), Command::Locate);
        assert_eq!(parse_command("/quit"), Command::Quit);
        assert_eq!(parse_command("   "), Command::Search("   "));
    }
}

use std::io::{self, Write};

use shared::conversation::ConversationWindow;
use shared::llm::{ChatGateway, ChatGatewayError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplInput<'a> {
    Quit,
    Blank,
    Prompt(&'a str),
}

fn classify(line: &str) -> ReplInput<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        ReplInput::Blank
    } else if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
        ReplInput::Quit
    } else {
        ReplInput::Prompt(trimmed)
    }
}

/// Runs the interactive loop. One outstanding exchange at a time; history
/// lives in a loop-local window and dies with the process.
pub(crate) async fn run(gateway: &dyn ChatGateway) -> io::Result<()> {
    let mut window = ConversationWindow::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Parley (type 'exit' to quit)");
    loop {
        print!("You: ");
        io::stdout().flush()?;

        let line = tokio::select! {
            _ = signal::ctrl_c() => {
                println!();
                break;
            }
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            // stdin closed
            println!();
            break;
        };

        let prompt = match classify(&line) {
            ReplInput::Blank => continue,
            ReplInput::Quit => break,
            ReplInput::Prompt(prompt) => prompt,
        };

        let completion = gateway.complete(prompt, window.turns()).await;
        match completion {
            Ok(reply) => {
                println!("Parley: {reply}\n");
                window.append_exchange(prompt, reply);
            }
            Err(ChatGatewayError::UpstreamStatus { body, .. }) => {
                println!("HTTP error: {body}");
            }
            Err(err) => {
                println!("Error: {err}");
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

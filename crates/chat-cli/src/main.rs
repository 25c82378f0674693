mod repl;

use shared::llm::{OpenRouterConfig, OpenRouterGateway};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // The credential check happens here, before the first prompt is read.
    let config = match OpenRouterConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("export OPENROUTER_API_KEY (or put it in .env) before running parley");
            std::process::exit(1);
        }
    };

    let gateway = match OpenRouterGateway::new(config) {
        Ok(gateway) => gateway,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = repl::run(&gateway).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

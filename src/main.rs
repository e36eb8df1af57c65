use anyhow::Result;
use clap::Parser;
use nano_banana_imager::app::App;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "nano-banana-imager")]
#[command(about = "Generate images with Gemini and save them to disk")]
struct CliArgs {
    /// Text description of the image to generate.
    #[arg(long)]
    prompt: String,

    /// Output filename or prefix (e.g. 'hero_image' or 'hero_image.png').
    #[arg(long)]
    output: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nano_banana_imager=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    match App::new() {
        Ok(app) => match app.run(&args.prompt, &args.output).await {
            Ok(_) => Ok(()),
            Err(e) => {
                error!("Error during generation: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

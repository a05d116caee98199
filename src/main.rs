use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tokio::io::AsyncReadExt;

use akismet_spam_filter::{
    app, config,
    infrastructure::{directories, logging},
    options::supported_options,
    AkismetPlugin, CommentSubmission, ContentObject, RequestHeaders,
};

#[derive(Debug, Parser)]
#[command(version, about = "Akismet comment spam filter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify a JSON comment read from stdin and print the host verdict code
    Check,
    /// Check the configured API key against the service
    VerifyKey,
    /// Print the plugin's option descriptors as JSON
    Options,
}

#[derive(Debug, Deserialize)]
struct CheckInput {
    #[serde(flatten)]
    comment: CommentSubmission,
    target: ContentObject,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Command::Options => {
            println!("{}", serde_json::to_string_pretty(&supported_options())?);
            Ok(())
        }
        Command::Check => run_check(&bootstrap()?).await,
        Command::VerifyKey => run_verify_key(&bootstrap()?).await,
    }
}

fn bootstrap() -> Result<AkismetPlugin> {
    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config.logging, &paths)?;
    app::initialize(&config)
}

async fn run_check(plugin: &AkismetPlugin) -> Result<()> {
    let mut raw = String::new();
    tokio::io::stdin()
        .read_to_string(&mut raw)
        .await
        .context("failed to read comment from stdin")?;
    let CheckInput { comment, target } =
        serde_json::from_str(&raw).context("comment is not valid JSON")?;

    let headers = RequestHeaders {
        user_agent: comment.user_agent.clone(),
        referrer: comment.referrer.clone(),
    };
    let code = plugin
        .filter_message(
            &comment.author,
            &comment.email,
            &comment.website,
            &comment.body,
            &target,
            &comment.submitter_ip,
            headers,
        )
        .await?;
    println!("{code}");
    Ok(())
}

async fn run_verify_key(plugin: &AkismetPlugin) -> Result<()> {
    if plugin.filter().verify_key().await? {
        println!("valid");
        Ok(())
    } else {
        println!("invalid");
        bail!("Akismet rejected the configured API key")
    }
}

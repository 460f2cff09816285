use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "framegate-cli")]
#[command(about = "Management CLI for framegate", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured proxies
    List,
    /// Add a proxy definition
    Add {
        name: String,
        target_url: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Explicit id (derived from the name when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// Enable a proxy
    Enable { id: String },
    /// Disable a proxy
    Disable { id: String },
    /// Remove a proxy definition
    Remove { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = format!("{}/_rproxy/proxies", cli.url);

    match cli.command {
        Commands::List => {
            let res = client.get(&base).send().await?;
            print_response(res).await?;
        }
        Commands::Add {
            name,
            target_url,
            description,
            id,
        } => {
            let res = client
                .post(&base)
                .json(&json!({
                    "name": name,
                    "target_url": target_url,
                    "description": description,
                    "id": id,
                }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Enable { id } => {
            let res = client
                .put(format!("{}/{}", base, id))
                .json(&json!({ "enabled": true }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Disable { id } => {
            let res = client
                .put(format!("{}/{}", base, id))
                .json(&json!({ "enabled": false }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Remove { id } => {
            let res = client.delete(format!("{}/{}", base, id)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: management API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("{}", text);
        }
        std::process::exit(1);
    }

    let value: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

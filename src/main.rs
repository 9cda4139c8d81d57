use clap::Parser;
use visual_search::{cli, client, config, error, report, session};
use cli::{Cli, Commands};
use config::Config;
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("✖ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Search { image, server, json, quiet } => {
            if !json {
                println!("🔎 visual-search - búsqueda visual\n");
            }

            let server_url = config.resolve_server_url(server.as_deref());
            let upload_url = config::join_url(&server_url, &config.timing.endpoint);
            let client = client::SearchClient::new(upload_url, config.timeout())?;
            if cli.verbose {
                println!("- Endpoint: {}", client.upload_url());
            }

            let bar = if quiet || json {
                indicatif::ProgressBar::hidden()
            } else {
                session::progress_bar()
            };
            let mut session = session::SearchSession::new(config.timing.clone(), bar, cli.verbose);

            if session.select(&image)? {
                if cli.verbose {
                    if let Some(selected) = session.image() {
                        println!("- Archivo: {} ({} bytes)", selected.name, selected.bytes.len());
                    }
                }
            } else {
                eprintln!("Archivo no encontrado: {}", image.display());
            }

            let hits = session
                .submit(move |selected| async move { client.upload(&selected.name, selected.bytes).await })
                .await?;

            if json {
                println!("{}", report::to_json(&hits)?);
            } else if let Some(view) = session.results() {
                println!();
                report::print_results(&view);
                println!("\n✅ {} resultado(s)", hits.len());
            }
        }

        Commands::Config { set_server, show } => {
            let mut config = config;

            if let Some(url) = set_server {
                config.set_server_url(&url)?;
                config.save()?;
                println!("✔ Servidor configurado: {}", config.server_url);
            }

            if show {
                println!("Configuración:");
                println!("  Archivo: {}", Config::config_path()?.display());
                println!("  Servidor: {}", config.server_url);
                println!("  Servidor efectivo: {}", config.resolve_server_url(None));
                println!("  Endpoint: {}", config.timing.endpoint);
                println!("  Timeout: {}s", config.timeout_seconds);
                println!("  Animación: {}ms", config.timing.total_animation_ms);
            }
        }
    }

    Ok(())
}

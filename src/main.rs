use clap::Parser;
use notas::cli::{
    handle_delete, handle_edit, handle_list, handle_new, handle_pwa_check, handle_pwa_manifest,
    handle_pwa_workbox, handle_show, Cli, Commands, Context, PwaAction,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let result = Context::load(cli.config.as_deref(), cli.data_dir).and_then(|ctx| {
        match cli.command {
            Commands::New {
                title,
                content,
                stdin,
                json,
            } => handle_new(&ctx, title, content, stdin, json),
            Commands::Edit {
                id,
                title,
                content,
                stdin,
                json,
            } => handle_edit(&ctx, id, title, content, stdin, json),
            Commands::Delete { id } => handle_delete(&ctx, id),
            Commands::Show { id, json } => handle_show(&ctx, id, json),
            Commands::List { json } => handle_list(&ctx, json),
            Commands::Pwa(pwa) => match pwa.action {
                PwaAction::Manifest { out } => handle_pwa_manifest(&ctx, out),
                PwaAction::Workbox { out } => handle_pwa_workbox(&ctx, out),
                PwaAction::Check => handle_pwa_check(&ctx),
            },
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

use actix_web::{middleware, web, App, HttpServer};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use std::time::Duration;
use teamdocs::config::Config;
use teamdocs::services;
use teamdocs::session::state::start_session_sweeper;
use teamdocs::state::AppState;
use teamdocs::users::UserDirectory;

#[derive(Parser)]
#[command(name = "teamdocs", version, about = "Team-scoped PDF and sheet link catalogue")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web server (the default).
    Serve,
    /// Add a user to the users file.
    AddUser {
        username: String,
        team: String,
        #[arg(long)]
        password: String,
    },
    /// Print every username and team.
    ListUsers,
}

const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await?,
        Command::AddUser {
            username,
            team,
            password,
        } => {
            let users = UserDirectory::open(&config.users_file)?;
            let identity = users.add_user(&username, &password, &team)?;
            println!("added {} to {}", identity.username, identity.team);
        }
        Command::ListUsers => {
            let users = UserDirectory::open(&config.users_file)?;
            for identity in users.list_users()? {
                println!("{}\t{}", identity.username, identity.team);
            }
        }
    }
    Ok(())
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    let state = AppState::new(&config)?;

    let sweeper_state = state.sessions.clone();
    actix_web::rt::spawn(async move {
        start_session_sweeper(sweeper_state, SWEEP_INTERVAL).await;
    });

    let (host, port) = config.bind_address();
    info!(
        "Server running at http://{}:{} (store {}, uploads {})",
        host,
        port,
        config.data_file.display(),
        config.upload_dir.display()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
    })
    .bind((host, port))?
    .run()
    .await?;
    Ok(())
}

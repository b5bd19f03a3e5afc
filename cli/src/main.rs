#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};
use turnos_client::config::{CSRF_COOKIE, ClientConfig, ConfigError, SESSION_COOKIE};
use turnos_client::net::reqwest_transport::ReqwestTransport;
use turnos_client::net::{blocks, booking, cancellation_policies, customer, schedules, services, specialties, tenants};
use turnos_client::router::{NavigationError, NavigationOutcome};
use turnos_client::{ApiError, Session, Transport};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("navigation failed: {0}")]
    Navigation(#[from] NavigationError),
    #[error("no staff session; run `turnos login` and pass the printed cookies")]
    NotSignedIn,
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "turnos", about = "Appointment booking client CLI")]
struct Cli {
    #[arg(long, env = "TURNOS_API_BASE_URL")]
    base_url: Option<String>,

    /// Value of the `JSESSIONID` cookie from a previous login.
    #[arg(long, env = "TURNOS_SESSION_COOKIE")]
    session_cookie: Option<String>,

    /// Value of the `XSRF-TOKEN` cookie from a previous login.
    #[arg(long, env = "TURNOS_CSRF_TOKEN")]
    csrf_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Staff login; prints the profile and the cookies to reuse.
    Login {
        #[arg(long, env = "TURNOS_USERNAME")]
        username: String,
        #[arg(long, env = "TURNOS_PASSWORD")]
        password: String,
    },
    Logout,
    /// Show the staff identity behind the current cookies.
    Whoami,
    /// Run the navigation guard for a client route and print where it lands.
    Navigate { path: String },
    Cliente(ClienteCommand),
    Publico(PublicoCommand),
    Servicios(ListCommand),
    Especialidades(FilteredListCommand),
    Politicas(FilteredListCommand),
    Bloqueos(ListCommand),
    Disponibilidad(ListCommand),
    Empresas(ListCommand),
}

#[derive(Args, Debug)]
struct ListCommand {
    #[command(subcommand)]
    command: ListSubcommand,
}

#[derive(Subcommand, Debug)]
enum ListSubcommand {
    List,
}

#[derive(Args, Debug)]
struct FilteredListCommand {
    #[command(subcommand)]
    command: FilteredListSubcommand,
}

#[derive(Subcommand, Debug)]
enum FilteredListSubcommand {
    /// Active records only, unless `--all` is given.
    List {
        #[arg(long, default_value_t = false)]
        all: bool,
    },
}

#[derive(Args, Debug)]
struct ClienteCommand {
    #[command(subcommand)]
    command: ClienteSubcommand,
}

#[derive(Subcommand, Debug)]
enum ClienteSubcommand {
    Login {
        slug: String,
        #[arg(long)]
        telefono: String,
        #[arg(long, env = "TURNOS_CUSTOMER_PASSWORD")]
        password: String,
    },
    Turnos,
}

#[derive(Args, Debug)]
struct PublicoCommand {
    #[command(subcommand)]
    command: PublicoSubcommand,
}

#[derive(Subcommand, Debug)]
enum PublicoSubcommand {
    Empresa {
        slug: String,
    },
    Servicios {
        slug: String,
    },
    Profesionales {
        slug: String,
        #[arg(long)]
        servicio: i64,
    },
    Disponibilidad {
        slug: String,
        #[arg(long)]
        servicio: i64,
        #[arg(long)]
        profesional: i64,
        /// `YYYY-MM-DD`
        #[arg(long)]
        fecha: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    let session = Session::connect(&config)?;
    if let Some(value) = &cli.session_cookie {
        session.http().transport().seed_cookie(SESSION_COOKIE, value);
    }
    if let Some(value) = &cli.csrf_token {
        session.http().transport().seed_cookie(CSRF_COOKIE, value);
    }

    match cli.command {
        Command::Login { username, password } => run_login(&session, &username, &password).await,
        Command::Logout => {
            session.logout().await?;
            println!("ok");
            Ok(())
        }
        Command::Whoami => {
            if !session.restore().await {
                return Err(CliError::NotSignedIn);
            }
            let user = session.auth().user().ok_or(CliError::NotSignedIn)?;
            print_json(&user)
        }
        Command::Navigate { path } => run_navigate(&session, &path).await,
        Command::Cliente(cmd) => run_cliente(&session, cmd).await,
        Command::Publico(cmd) => run_publico(&session, cmd).await,
        Command::Servicios(ListCommand { command: ListSubcommand::List }) => print_json(&services::list(session.http()).await?),
        Command::Especialidades(FilteredListCommand { command: FilteredListSubcommand::List { all } }) => {
            let items = if all {
                specialties::list_all(session.http()).await?
            } else {
                specialties::list_active(session.http()).await?
            };
            print_json(&items)
        }
        Command::Politicas(FilteredListCommand { command: FilteredListSubcommand::List { all } }) => {
            let items = if all {
                cancellation_policies::list_all(session.http()).await?
            } else {
                cancellation_policies::list_active(session.http()).await?
            };
            print_json(&items)
        }
        Command::Bloqueos(ListCommand { command: ListSubcommand::List }) => print_json(&blocks::list(session.http()).await?),
        Command::Disponibilidad(ListCommand { command: ListSubcommand::List }) => print_json(&schedules::list(session.http()).await?),
        Command::Empresas(ListCommand { command: ListSubcommand::List }) => print_json(&tenants::list(session.http()).await?),
    }
}

async fn run_login(session: &Session<ReqwestTransport>, username: &str, password: &str) -> Result<(), CliError> {
    let user = session.login(username, password).await?;
    let transport = session.http().transport();
    print_json(&json!({
        "user": user,
        "session_cookie": transport.cookie(SESSION_COOKIE),
        "csrf_token": transport.cookie(CSRF_COOKIE),
    }))
}

async fn run_navigate(session: &Session<ReqwestTransport>, path: &str) -> Result<(), CliError> {
    let rendered = match session.navigate(path).await? {
        NavigationOutcome::Arrived(route) => json!({
            "route": route.name,
            "path": route.path,
            "full_path": route.full_path,
            "params": route.params.into_iter().map(|(k, v)| (k, Value::String(v))).collect::<serde_json::Map<_, _>>(),
        }),
        NavigationOutcome::Superseded => json!({ "superseded": true }),
    };
    print_json(&rendered)
}

async fn run_cliente(session: &Session<ReqwestTransport>, cmd: ClienteCommand) -> Result<(), CliError> {
    match cmd.command {
        ClienteSubcommand::Login { slug, telefono, password } => {
            let customer = session.login_customer(&slug, &telefono, &password).await?;
            let transport = session.http().transport();
            print_json(&json!({
                "customer": customer,
                "session_cookie": transport.cookie(SESSION_COOKIE),
            }))
        }
        ClienteSubcommand::Turnos => print_json(&customer::my_bookings(session.http()).await?),
    }
}

async fn run_publico(session: &Session<ReqwestTransport>, cmd: PublicoCommand) -> Result<(), CliError> {
    let http = session.http();
    match cmd.command {
        PublicoSubcommand::Empresa { slug } => print_json(&booking::tenant(http, &slug).await?),
        PublicoSubcommand::Servicios { slug } => print_json(&booking::services(http, &slug).await?),
        PublicoSubcommand::Profesionales { slug, servicio } => {
            print_json(&booking::professionals(http, &slug, servicio).await?)
        }
        PublicoSubcommand::Disponibilidad { slug, servicio, profesional, fecha } => {
            print_json(&booking::availability(http, &slug, servicio, profesional, &fecha).await?)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

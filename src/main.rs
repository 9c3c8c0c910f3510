use axum_extra::extract::cookie::Key;
use clap::Parser;
use color_eyre::eyre::ensure;
use trivia_duel::store::Sessions;
use trivia_duel::trivia::TriviaClient;
use trivia_duel::AppState;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Secret key used to sign the visitor session cookie.
    #[clap(env, hide_env_values = true)]
    secret_key: String,

    /// Base URL of the Open Trivia DB API.
    #[arg(long, env, default_value = "https://opentdb.com")]
    trivia_url: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: String,

    /// Enable debug logging.
    #[arg(long, env, default_value_t = false)]
    debug: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let default_filter = if args.debug {
        "trivia_duel=debug,axum=debug"
    } else {
        "trivia_duel=info"
    };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_owned());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    ensure!(
        args.secret_key.len() >= 32,
        "SECRET_KEY must be at least 32 bytes"
    );

    let state = AppState {
        sessions: Sessions::in_memory(),
        trivia: TriviaClient::new(&args.trivia_url)?,
        key: Key::derive_from(args.secret_key.as_bytes()),
    };
    let routes = trivia_duel::router(state);

    let address = args.address.parse::<std::net::SocketAddr>()?;
    tracing::info!("listening on {address}");
    let listener = tokio::net::TcpListener::bind(address).await?;
    axum::serve(listener, routes).await?;

    Ok(())
}

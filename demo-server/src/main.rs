use std::net::SocketAddr;

use axum::{Router, middleware, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relato_axum::{AuthUser, relato_router, sliding_session_renewal};

fn init_tracing(app_name: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            format!("relato_axum=trace,relato=trace,{app_name}=trace,info").into()
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = app_name;
            "info".into()
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("You can increase verbosity by setting the RUST_LOG environment variable.");
}

async fn index() -> &'static str {
    "relato demo server"
}

async fn whoami(user: AuthUser) -> String {
    format!("Logged in as {} <{}>", user.username, user.email)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing("demo_server");

    relato_axum::init().await?;

    let app = Router::new()
        .route("/", get(index))
        .route("/whoami", get(whoami))
        .merge(relato_router())
        .layer(middleware::from_fn(sliding_session_renewal));

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

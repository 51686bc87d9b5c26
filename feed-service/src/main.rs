use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use db_pool::DbConfig;
use feed_service::config::Config;
use feed_service::db::{LikeRepository, PostRepository};
use feed_service::grpc::{CommentServiceClient, UserServiceClient};
use feed_service::handlers::{
    get_follow_feed, get_global_feed, metrics_endpoint, FeedHandlerState,
};
use feed_service::services::FeedService;
use grpc_clients::{GrpcClientPool, GrpcConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("starting feed-service v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env();
    info!(
        env = %config.app.env,
        http_port = config.app.http_port,
        "configuration loaded"
    );

    // Initialize database pool
    let db_config = DbConfig::from_env("feed-service")
        .map_err(|e| anyhow::anyhow!("failed to load database config: {e}"))?;
    let pg_pool = db_pool::create_pool(&db_config)
        .await
        .context("failed to connect to database")?;

    // Run database migrations
    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .context("failed to run database migrations")?;
    info!("database migrations completed");

    // Initialize gRPC clients for the user and comment services
    let grpc_config = GrpcConfig::from_env();
    let grpc_pool = Arc::new(
        GrpcClientPool::new(&grpc_config).context("failed to create gRPC client pool")?,
    );

    // Wire the feed-assembly pipeline
    let user_client = Arc::new(UserServiceClient::from_pool(grpc_pool.clone()));
    let comment_client = Arc::new(CommentServiceClient::from_pool(grpc_pool));
    let post_repo = Arc::new(PostRepository::new(pg_pool.clone()));
    let like_repo = Arc::new(LikeRepository::new(pg_pool));

    let feed = Arc::new(FeedService::new(
        post_repo,
        user_client.clone(),
        comment_client,
        like_repo,
    ));

    let state = web::Data::new(FeedHandlerState {
        feed,
        follow_graph: user_client,
        default_page_size: config.feed.default_page_size,
        max_page_size: config.feed.max_page_size,
    });

    let bind_addr = (config.app.host.clone(), config.app.http_port);
    info!("feed API listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/health", web::get().to(|| async { "OK" }))
            .route("/ready", web::get().to(|| async { "READY" }))
            .route("/metrics", web::get().to(metrics_endpoint))
            .service(
                web::scope("/api/v1/feed")
                    .route("/global", web::get().to(get_global_feed))
                    .route("/follow", web::get().to(get_follow_feed)),
            )
    })
    .bind(bind_addr)
    .context("failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")
}

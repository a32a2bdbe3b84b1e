mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use std::sync::Arc;

use application::user_service::UserService;
use data::user_repository::MongoUserRepository;
use infrastructure::config::AppConfig;
use infrastructure::database::connect;
use infrastructure::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;
    let db = connect(&config.mongodb_uri, &config.database_name).await?;

    let user_repo = Arc::new(MongoUserRepository::new(&db));
    let user_service = UserService::new(user_repo);

    server::start_rest_server(config, user_service).await
}

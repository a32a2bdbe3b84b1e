use mongodb::bson::doc;
use mongodb::{Client, Database};
use tracing::info;

pub async fn connect(uri: &str, database_name: &str) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(uri).await?;
    let db = client.database(database_name);

    db.run_command(doc! { "ping": 1 }).await?;
    info!(database = %database_name, "connected to MongoDB");
    Ok(db)
}

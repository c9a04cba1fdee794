//! Database provisioning on an embedded cluster.
//!
//! Databases are dropped and recreated through `postgres` rather than Diesel
//! because `DROP DATABASE` cannot run inside a transaction. The schema comes
//! from the backend's own embedded migrations so tests never drift from it.

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};

use analogy_backend::outbound::persistence::run_migrations;

use super::format_postgres_error;

const MAINTENANCE_DB: &str = "postgres";

/// Recreate `name` as an empty database on `cluster`.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<(), String> {
    let url = cluster.connection().database_url(MAINTENANCE_DB);
    let mut client = Client::connect(&url, NoTls).map_err(|err| format_postgres_error(&err))?;
    // Separate round trips: a multi-statement batch is one implicit
    // transaction, which `DROP DATABASE` refuses.
    for statement in [
        format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"),
        format!("CREATE DATABASE \"{name}\""),
    ] {
        client
            .batch_execute(&statement)
            .map_err(|err| format_postgres_error(&err))?;
    }
    Ok(())
}

/// Apply every backend migration to the database at `url`.
pub fn migrate_schema(url: &str) -> Result<(), String> {
    run_migrations(url).map_err(|err| err.to_string())
}

/// Insert a bare account row so history rows have an owner to reference.
pub fn seed_account(url: &str, id: &uuid::Uuid, username: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let email = format!("{username}@example.com");
    client
        .execute(
            "INSERT INTO accounts (id, username, email, password_hash) VALUES ($1, $2, $3, $4)",
            &[id, &username, &email, &"unused-hash"],
        )
        .map(|_| ())
        .map_err(|err| format_postgres_error(&err))
}

//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. The order table is named
//! `client_order` because `ORDER` is a SurrealQL keyword.
//!
//! Foreign-key behavior (cascade / nullify) is not expressible as DDL
//! here; the repository delete methods implement it explicitly.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Staff users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD username ON TABLE user TYPE string;
DEFINE FIELD surname ON TABLE user TYPE string;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD patronymic ON TABLE user TYPE string;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['admin', 'user'];
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_username ON TABLE user COLUMNS username UNIQUE;
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Login sessions
-- =======================================================================
DEFINE TABLE session SCHEMAFULL;
DEFINE FIELD user_id ON TABLE session TYPE string;
DEFINE FIELD token_hash ON TABLE session TYPE string;
DEFINE FIELD created_at ON TABLE session TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD expires_at ON TABLE session TYPE datetime;
DEFINE INDEX idx_session_token ON TABLE session \
    COLUMNS token_hash UNIQUE;
DEFINE INDEX idx_session_user ON TABLE session COLUMNS user_id;

-- =======================================================================
-- Password-reset tokens (single-use)
-- =======================================================================
DEFINE TABLE password_reset SCHEMAFULL;
DEFINE FIELD user_id ON TABLE password_reset TYPE string;
DEFINE FIELD token_hash ON TABLE password_reset TYPE string;
DEFINE FIELD created_at ON TABLE password_reset TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD expires_at ON TABLE password_reset TYPE datetime;
DEFINE FIELD consumed ON TABLE password_reset TYPE bool DEFAULT false;
DEFINE INDEX idx_password_reset_token ON TABLE password_reset \
    COLUMNS token_hash UNIQUE;

-- =======================================================================
-- Clients
-- =======================================================================
DEFINE TABLE client SCHEMAFULL;
DEFINE FIELD surname ON TABLE client TYPE string;
DEFINE FIELD name ON TABLE client TYPE string;
DEFINE FIELD email ON TABLE client TYPE string;
DEFINE FIELD registered_at ON TABLE client TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD created_by ON TABLE client TYPE string;
DEFINE INDEX idx_client_email ON TABLE client COLUMNS email UNIQUE;
DEFINE INDEX idx_client_creator ON TABLE client COLUMNS created_by;

-- =======================================================================
-- Couriers
-- =======================================================================
DEFINE TABLE courier SCHEMAFULL;
DEFINE FIELD surname ON TABLE courier TYPE string;
DEFINE FIELD name ON TABLE courier TYPE string;
DEFINE FIELD email ON TABLE courier TYPE string;
DEFINE FIELD registered_at ON TABLE courier TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD created_by ON TABLE courier TYPE string;
DEFINE INDEX idx_courier_email ON TABLE courier COLUMNS email UNIQUE;
DEFINE INDEX idx_courier_creator ON TABLE courier COLUMNS created_by;

-- =======================================================================
-- Products & categories
-- =======================================================================
DEFINE TABLE product SCHEMAFULL;
DEFINE FIELD name ON TABLE product TYPE string;
DEFINE FIELD price_cents ON TABLE product TYPE int \
    ASSERT $value >= 0;
DEFINE FIELD category ON TABLE product TYPE option<string>;
DEFINE FIELD stock ON TABLE product TYPE int DEFAULT 0;

DEFINE TABLE category SCHEMAFULL;
DEFINE FIELD name ON TABLE category TYPE string;
DEFINE INDEX idx_category_name ON TABLE category COLUMNS name UNIQUE;

-- =======================================================================
-- Status dictionaries
-- =======================================================================
DEFINE TABLE order_status SCHEMAFULL;
DEFINE FIELD name ON TABLE order_status TYPE string;

DEFINE TABLE payment_status SCHEMAFULL;
DEFINE FIELD name ON TABLE payment_status TYPE string;

-- =======================================================================
-- Orders (`order` is a SurrealQL keyword)
-- =======================================================================
DEFINE TABLE client_order SCHEMAFULL;
DEFINE FIELD status_id ON TABLE client_order TYPE option<string>;
DEFINE FIELD content ON TABLE client_order TYPE option<string>;
DEFINE FIELD created_at ON TABLE client_order TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD client_id ON TABLE client_order TYPE string;
DEFINE FIELD courier_id ON TABLE client_order TYPE option<string>;
DEFINE FIELD created_by ON TABLE client_order TYPE string;
DEFINE INDEX idx_order_creator ON TABLE client_order \
    COLUMNS created_by;
DEFINE INDEX idx_order_client ON TABLE client_order COLUMNS client_id;

DEFINE TABLE order_item SCHEMAFULL;
DEFINE FIELD order_id ON TABLE order_item TYPE string;
DEFINE FIELD product_id ON TABLE order_item TYPE string;
DEFINE FIELD amount ON TABLE order_item TYPE int ASSERT $value > 0;
DEFINE FIELD price_cents ON TABLE order_item TYPE int \
    ASSERT $value >= 0;
DEFINE INDEX idx_order_item_order ON TABLE order_item \
    COLUMNS order_id;

-- =======================================================================
-- Payments
-- =======================================================================
DEFINE TABLE payment SCHEMAFULL;
DEFINE FIELD order_id ON TABLE payment TYPE string;
DEFINE FIELD client_id ON TABLE payment TYPE string;
DEFINE FIELD paid_at ON TABLE payment TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD status_id ON TABLE payment TYPE option<string>;
DEFINE FIELD amount_cents ON TABLE payment TYPE int \
    ASSERT $value > 0;
DEFINE FIELD created_by ON TABLE payment TYPE string;
DEFINE INDEX idx_payment_creator ON TABLE payment COLUMNS created_by;
DEFINE INDEX idx_payment_order ON TABLE payment COLUMNS order_id;

-- =======================================================================
-- Feedback
-- =======================================================================
DEFINE TABLE feedback SCHEMAFULL;
DEFINE FIELD order_id ON TABLE feedback TYPE string;
DEFINE FIELD client_id ON TABLE feedback TYPE string;
DEFINE FIELD reviewed_at ON TABLE feedback TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD comment ON TABLE feedback TYPE option<string>;
DEFINE FIELD rating ON TABLE feedback TYPE int \
    ASSERT $value >= 1 AND $value <= 5;
DEFINE FIELD created_by ON TABLE feedback TYPE string;
DEFINE INDEX idx_feedback_creator ON TABLE feedback \
    COLUMNS created_by;
DEFINE INDEX idx_feedback_order ON TABLE feedback COLUMNS order_id;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }

    #[test]
    fn schema_defines_every_table() {
        for table in [
            "user",
            "session",
            "password_reset",
            "client",
            "courier",
            "product",
            "category",
            "order_status",
            "payment_status",
            "client_order",
            "order_item",
            "payment",
            "feedback",
        ] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} ")),
                "missing table definition: {table}"
            );
        }
    }
}

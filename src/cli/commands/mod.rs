pub mod backup;
pub mod config;
pub mod event;
pub mod export;
pub mod init;
pub mod log;
pub mod med;
pub mod twin;

use crate::config::Config;
use crate::db::log::htlog_quiet;
use crate::db::pool::DbPool;

/// Record a mutation in the audit log. Never fails the command.
pub(crate) fn audit(cfg: &Config, operation: &str, target: &str, message: &str) {
    match DbPool::new(&cfg.database) {
        Ok(pool) => htlog_quiet(&pool.conn, operation, target, message),
        Err(e) => tracing::warn!(operation, "Cannot open database for audit log: {e}"),
    }
}

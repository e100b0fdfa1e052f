mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

use crate::models::Expense;

/// Persisted key-value layout, string-valued:
/// `expenses` holds a JSON array of expense objects, `monthlyGoal` holds a
/// decimal string. Key names are part of the storage contract.
const KEY_EXPENSES: &str = "expenses";
const KEY_MONTHLY_GOAL: &str = "monthlyGoal";

/// Everything the ledger persists. Written back whole on every mutation.
#[derive(Debug, Clone, Default)]
pub(crate) struct LedgerState {
    pub(crate) expenses: Vec<Expense>,
    pub(crate) monthly_goal: f64,
}

/// Storage capability injected into the ledger. Implementations are
/// synchronous; a missing store reads back as the default (empty) state.
pub(crate) trait Store {
    fn load(&self) -> Result<LedgerState>;
    fn save(&self, state: &LedgerState) -> Result<()>;
}

fn encode_expenses(expenses: &[Expense]) -> Result<String> {
    serde_json::to_string(expenses).context("Failed to encode expenses")
}

fn decode_state(expenses_json: Option<String>, goal_str: Option<String>) -> Result<LedgerState> {
    let expenses = match expenses_json {
        Some(json) => serde_json::from_str(&json).context("Failed to decode stored expenses")?,
        None => Vec::new(),
    };
    // An absent or unreadable goal means "no goal set"
    let monthly_goal = goal_str
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);
    Ok(LedgerState {
        expenses,
        monthly_goal,
    })
}

// ── SQLite backend ───────────────────────────────────────────

pub(crate) struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open store: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set store pragmas")?;
        let store = Self { conn };
        store.migrate().context("Store migration failed")?;
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh store - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Store for SqliteStore {
    fn load(&self) -> Result<LedgerState> {
        decode_state(self.get(KEY_EXPENSES)?, self.get(KEY_MONTHLY_GOAL)?)
    }

    fn save(&self, state: &LedgerState) -> Result<()> {
        let expenses_json = encode_expenses(&state.expenses)?;
        // Both keys change together or not at all
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![KEY_EXPENSES, expenses_json],
        )?;
        tx.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![KEY_MONTHLY_GOAL, state.monthly_goal.to_string()],
        )?;
        tx.commit()?;
        Ok(())
    }
}

// ── In-memory backend (tests) ────────────────────────────────

/// Holds the same string layout as the SQLite backend so reload tests
/// exercise the real codec. Clones share the underlying map, which stands
/// in for "the same store reopened".
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct MemStore {
    map: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, String>>>,
}

#[cfg(test)]
impl MemStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl Store for MemStore {
    fn load(&self) -> Result<LedgerState> {
        let map = self.map.borrow();
        decode_state(
            map.get(KEY_EXPENSES).cloned(),
            map.get(KEY_MONTHLY_GOAL).cloned(),
        )
    }

    fn save(&self, state: &LedgerState) -> Result<()> {
        let mut map = self.map.borrow_mut();
        map.insert(KEY_EXPENSES.into(), encode_expenses(&state.expenses)?);
        map.insert(KEY_MONTHLY_GOAL.into(), state.monthly_goal.to_string());
        Ok(())
    }
}

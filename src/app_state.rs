//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, config::DisplayConfig, db::initialize};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The currency symbol and timezone used when rendering pages.
    pub display: DisplayConfig,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the expense table.
    /// The timezone in `display` should be a valid, canonical timezone name,
    /// e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, display: DisplayConfig) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            display,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{config::DisplayConfig, expense::list_expenses};

    use super::AppState;

    #[test]
    fn new_initializes_database() {
        let connection = Connection::open_in_memory().unwrap();

        let state = AppState::new(connection, DisplayConfig::default()).unwrap();

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(list_expenses(&connection), Ok(vec![]));
    }
}

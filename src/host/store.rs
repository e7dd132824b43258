use anyhow::{Context, Error, Result};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use tracing::debug;

use super::schema::{exchanges, participants};
use super::treatment::Treatments;
use crate::chat_core::Exchange;

type Pooled = diesel::r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

const CREATE_EXCHANGES: &str = "CREATE TABLE IF NOT EXISTS exchanges (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    participant TEXT NOT NULL,
    prompt TEXT NOT NULL,
    response TEXT NOT NULL
)";

const CREATE_PARTICIPANTS: &str = "CREATE TABLE IF NOT EXISTS participants (
    participant TEXT PRIMARY KEY NOT NULL,
    treatment TEXT NOT NULL
)";

/// Every participant's thread and treatment, kept in SQLite.
#[derive(Clone)]
pub struct Store {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl Store {
    pub fn open(database_url: &str) -> Result<Store> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        // An in-memory database lives and dies with its single connection.
        let max_size = if database_url == ":memory:" { 1 } else { 8 };
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .with_context(|| format!("Failed to open database {database_url}"))?;

        let store = Store { pool };
        let mut conn = store.conn()?;
        diesel::sql_query(CREATE_EXCHANGES).execute(&mut conn)?;
        diesel::sql_query(CREATE_PARTICIPANTS).execute(&mut conn)?;
        drop(conn);
        Ok(store)
    }

    /// Returns the participant's treatment, assigning one on first visit.
    pub fn enrol(&self, participant: &str, treatments: &Treatments) -> Result<Option<String>> {
        let mut conn = self.conn()?;
        conn.transaction::<_, Error, _>(|conn| {
            let existing = participants::table
                .filter(participants::participant.eq(participant))
                .select(participants::treatment)
                .first::<String>(conn)
                .optional()?;
            if existing.is_some() {
                return Ok(existing);
            }

            let enrolled = participants::table.count().get_result::<i64>(conn)?;
            let Some(treatment) = treatments.assign(enrolled as usize) else {
                return Ok(None);
            };
            diesel::insert_into(participants::table)
                .values((
                    participants::participant.eq(participant),
                    participants::treatment.eq(&treatment),
                ))
                .execute(conn)?;
            debug!(participant, %treatment, "participant enrolled");
            Ok(Some(treatment))
        })
    }

    pub fn thread(&self, participant: &str) -> Result<Vec<Exchange>> {
        let mut conn = self.conn()?;
        let rows = exchanges::table
            .filter(exchanges::participant.eq(participant))
            .order(exchanges::id.asc())
            .select((exchanges::prompt, exchanges::response))
            .load::<(String, String)>(&mut conn)?;
        Ok(rows
            .into_iter()
            .map(|(prompt, response)| Exchange { prompt, response })
            .collect())
    }

    pub fn record(&self, participant: &str, exchange: &Exchange) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(exchanges::table)
            .values((
                exchanges::participant.eq(participant),
                exchanges::prompt.eq(&exchange.prompt),
                exchanges::response.eq(&exchange.response),
            ))
            .execute(&mut conn)?;
        debug!(participant, "exchange recorded");
        Ok(())
    }

    fn conn(&self) -> Result<Pooled> {
        Ok(self.pool.get()?)
    }
}

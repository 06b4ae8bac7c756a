//! PostgreSQL-backed `SessionRepository`.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{SessionRepository, SessionRepositoryError};
use crate::domain::{ConferenceKey, Session, SessionFilter, SessionKey};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::SessionRow;
use super::pool::{DbPool, PoolError};
use super::schema::sessions;

#[derive(Clone)]
pub struct DieselSessionRepository {
    pool: DbPool,
}

impl DieselSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SessionRepositoryError {
    map_basic_pool_error(error, SessionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SessionRepositoryError {
    map_basic_diesel_error(
        error,
        SessionRepositoryError::query,
        SessionRepositoryError::connection,
    )
}

#[async_trait]
impl SessionRepository for DieselSessionRepository {
    async fn insert(&self, session: &Session) -> Result<(), SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(sessions::table)
            .values(&SessionRow::from(session))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_key(
        &self,
        key: &SessionKey,
    ) -> Result<Option<Session>, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<SessionRow> = sessions::table
            .find(key.as_uuid())
            .select(SessionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Session::from))
    }

    async fn find_by_keys(
        &self,
        keys: &[SessionKey],
    ) -> Result<Vec<Session>, SessionRepositoryError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = keys.iter().map(|key| *key.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SessionRow> = sessions::table
            .filter(sessions::id.eq_any(ids))
            .select(SessionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut by_key: HashMap<SessionKey, Session> = rows
            .into_iter()
            .map(Session::from)
            .map(|session| (session.key, session))
            .collect();
        Ok(keys.iter().filter_map(|key| by_key.remove(key)).collect())
    }

    async fn find_by_conference(
        &self,
        conference_key: &ConferenceKey,
        filter: &SessionFilter,
    ) -> Result<Vec<Session>, SessionRepositoryError> {
        let mut query = sessions::table
            .filter(sessions::conference_id.eq(*conference_key.as_uuid()))
            .select(SessionRow::as_select())
            .into_boxed();
        query = match filter {
            SessionFilter::All => query,
            SessionFilter::ByType(kind) => query.filter(sessions::type_of_session.eq(kind.clone())),
            SessionFilter::ByName(name) => query.filter(sessions::name.eq(name.clone())),
            SessionFilter::ByDate(date) => query.filter(sessions::date.eq(*date)),
        };
        let rows: Vec<SessionRow> = {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            query
                .order_by((
                    sessions::date.asc().nulls_first(),
                    sessions::start_time.asc().nulls_first(),
                    sessions::name,
                    sessions::id,
                ))
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?
        };
        Ok(rows.into_iter().map(Session::from).collect())
    }

    async fn find_by_speaker(&self, speaker: &str) -> Result<Vec<Session>, SessionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SessionRow> = sessions::table
            .filter(sessions::speaker.eq(speaker))
            .order_by((
                sessions::date.asc().nulls_first(),
                sessions::start_time.asc().nulls_first(),
                sessions::name,
                sessions::id,
            ))
            .select(SessionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Session::from).collect())
    }
}

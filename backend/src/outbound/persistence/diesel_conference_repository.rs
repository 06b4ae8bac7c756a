//! PostgreSQL-backed `ConferenceRepository`.
//!
//! Searches compile a [`ConferenceSearch`] into one boxed Diesel query.
//! Topic predicates test whether any element of the `topics` array satisfies
//! the comparison, and topic ordering uses the smallest element with empty
//! topic lists first. The migrations pin `name`, `city` and `topics` to the
//! `C` collation, so text comparisons and ordering are bytewise and match
//! the in-memory adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Nullable, Text};
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use uuid::Uuid;

use crate::domain::ports::{ConferenceRepository, ConferenceRepositoryError};
use crate::domain::{
    Conference, ConferenceKey, ConferenceSearch, ConferenceUpdate, FilterField, FilterOperator,
    FilterValue, SortKey, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::ConferenceRow;
use super::pool::{DbPool, PoolError};
use super::schema::conferences;

const MIN_TOPIC_SQL: &str = "(SELECT min(topic) FROM unnest(conferences.topics) AS topic)";

/// Apply `column <op> value` to a boxed query.
macro_rules! filter_by {
    ($query:expr, $column:expr, $op:expr, $value:expr) => {
        match $op {
            FilterOperator::Eq => $query.filter($column.eq($value)),
            FilterOperator::Gt => $query.filter($column.gt($value)),
            FilterOperator::GtEq => $query.filter($column.ge($value)),
            FilterOperator::Lt => $query.filter($column.lt($value)),
            FilterOperator::LtEq => $query.filter($column.le($value)),
            FilterOperator::Ne => $query.filter($column.ne($value)),
        }
    };
}

#[derive(Clone)]
pub struct DieselConferenceRepository {
    pool: DbPool,
}

impl DieselConferenceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ConferenceRepositoryError {
    map_basic_pool_error(error, ConferenceRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ConferenceRepositoryError {
    map_basic_diesel_error(
        error,
        ConferenceRepositoryError::query,
        ConferenceRepositoryError::connection,
    )
}

/// Outcome of the locked update transaction, kept apart from Diesel errors
/// so domain rejections are not rolled into `query` failures.
enum UpdateOutcome {
    Updated(Conference),
    Missing,
    NotOwner,
}

/// Reorder `conferences` to follow `keys`, dropping unknown keys.
fn in_key_order(keys: &[ConferenceKey], conferences: Vec<Conference>) -> Vec<Conference> {
    let mut by_key: HashMap<ConferenceKey, Conference> = conferences
        .into_iter()
        .map(|conference| (conference.key, conference))
        .collect();
    keys.iter().filter_map(|key| by_key.remove(key)).collect()
}

#[async_trait]
impl ConferenceRepository for DieselConferenceRepository {
    async fn insert(&self, conference: &Conference) -> Result<(), ConferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(conferences::table)
            .values(&ConferenceRow::from(conference))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_key(
        &self,
        key: &ConferenceKey,
    ) -> Result<Option<Conference>, ConferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ConferenceRow> = conferences::table
            .find(key.as_uuid())
            .select(ConferenceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Conference::from))
    }

    async fn find_by_keys(
        &self,
        keys: &[ConferenceKey],
    ) -> Result<Vec<Conference>, ConferenceRepositoryError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = keys.iter().map(|key| *key.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ConferenceRow> = conferences::table
            .filter(conferences::id.eq_any(ids))
            .select(ConferenceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(in_key_order(
            keys,
            rows.into_iter().map(Conference::from).collect(),
        ))
    }

    async fn find_by_organizer(
        &self,
        organizer: &UserId,
    ) -> Result<Vec<Conference>, ConferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ConferenceRow> = conferences::table
            .filter(conferences::organizer_user_id.eq(organizer.as_uuid()))
            .order_by((conferences::name, conferences::id))
            .select(ConferenceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Conference::from).collect())
    }

    async fn search(
        &self,
        search: &ConferenceSearch,
    ) -> Result<Vec<Conference>, ConferenceRepositoryError> {
        let mut query = conferences::table
            .select(ConferenceRow::as_select())
            .into_boxed();

        for clause in search.clauses() {
            let op = clause.operator;
            query = match (clause.field, clause.value.clone()) {
                (FilterField::City, FilterValue::Text(value)) => {
                    filter_by!(query, conferences::city, op, value)
                }
                (FilterField::Topic, FilterValue::Text(value)) => query.filter(
                    sql::<Bool>(&format!(
                        "EXISTS (SELECT 1 FROM unnest(conferences.topics) AS topic WHERE topic {} ",
                        op.symbol()
                    ))
                    .bind::<Text, _>(value)
                    .sql(")"),
                ),
                (FilterField::Month, FilterValue::Integer(value)) => {
                    filter_by!(query, conferences::month, op, value)
                }
                (FilterField::MaxAttendees, FilterValue::Integer(value)) => {
                    filter_by!(query, conferences::max_attendees, op, value)
                }
                (field, value) => {
                    return Err(ConferenceRepositoryError::query(format!(
                        "filter value {value:?} does not fit field {field}"
                    )));
                }
            };
        }

        for sort_key in search.sort_keys() {
            query = match sort_key {
                SortKey::Name => query.then_order_by(conferences::name),
                SortKey::Field(FilterField::City) => query.then_order_by(conferences::city),
                SortKey::Field(FilterField::Topic) => {
                    query.then_order_by(sql::<Nullable<Text>>(MIN_TOPIC_SQL).asc().nulls_first())
                }
                SortKey::Field(FilterField::Month) => query.then_order_by(conferences::month),
                SortKey::Field(FilterField::MaxAttendees) => {
                    query.then_order_by(conferences::max_attendees)
                }
            };
        }
        query = query.then_order_by(conferences::id);

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ConferenceRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Conference::from).collect())
    }

    async fn update(
        &self,
        key: &ConferenceKey,
        organizer: &UserId,
        update: &ConferenceUpdate,
    ) -> Result<Conference, ConferenceRepositoryError> {
        let id = *key.as_uuid();
        let organizer = organizer.clone();
        let update = update.clone();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let row: Option<ConferenceRow> = conferences::table
                        .find(id)
                        .select(ConferenceRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(row) = row else {
                        return Ok(UpdateOutcome::Missing);
                    };
                    let mut conference = Conference::from(row);
                    if !conference.is_organised_by(&organizer) {
                        return Ok(UpdateOutcome::NotOwner);
                    }
                    update.apply_to(&mut conference);
                    diesel::update(conferences::table.find(id))
                        .set(&ConferenceRow::from(&conference))
                        .execute(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(UpdateOutcome::Updated(conference))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            UpdateOutcome::Updated(conference) => Ok(conference),
            UpdateOutcome::Missing => Err(ConferenceRepositoryError::not_found(*key)),
            UpdateOutcome::NotOwner => Err(ConferenceRepositoryError::not_owner()),
        }
    }

    async fn find_nearly_sold_out(
        &self,
        max_seats: i32,
    ) -> Result<Vec<Conference>, ConferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ConferenceRow> = conferences::table
            .filter(conferences::seats_available.between(1, max_seats))
            .order_by((conferences::name, conferences::id))
            .select(ConferenceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Conference::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn conference(name: &str) -> Conference {
        crate::domain::ConferenceDraft {
            name: name.to_owned(),
            ..Default::default()
        }
        .into_conference(ConferenceKey::generate(), UserId::random())
    }

    #[rstest]
    fn key_order_follows_the_request() {
        let a = conference("A");
        let b = conference("B");
        let missing = ConferenceKey::generate();
        let ordered = in_key_order(&[b.key, missing, a.key], vec![a.clone(), b.clone()]);
        assert_eq!(ordered, vec![b, a]);
    }

    #[rstest]
    fn closed_connections_map_to_connection_errors() {
        let error = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ClosedConnection,
            Box::new("gone".to_owned()),
        );
        assert!(matches!(
            map_diesel_error(error),
            ConferenceRepositoryError::Connection { .. }
        ));
    }
}

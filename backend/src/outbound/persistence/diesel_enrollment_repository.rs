//! PostgreSQL-backed `EnrollmentRepository` implementation using Diesel ORM.
//!
//! Identifiers are UUIDs in storage. An identifier that does not parse as a
//! UUID cannot match any row, so it is reported as not found rather than as
//! a query failure.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{
    Enrollment, EnrollmentFilter, EnrollmentId, EnrollmentRecord, EnrollmentStatus, NewEnrollment,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{EnrollmentRow, NewEnrollmentRow};
use super::pool::DbPool;
use super::schema::enrollments;

/// Diesel-backed implementation of the enrollment repository port.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_enrollment(row: EnrollmentRow) -> Result<Enrollment, EnrollmentRepositoryError> {
    let EnrollmentRow {
        id,
        user_id,
        course_id,
        status,
        created_at,
    } = row;
    let status = status
        .parse::<EnrollmentStatus>()
        .map_err(|err| EnrollmentRepositoryError::query(format!("stored row {id}: {err}")))?;

    Ok(EnrollmentRecord {
        id: EnrollmentId::new(id.to_string()),
        user_id,
        course_id,
        status,
        created_at,
    }
    .into())
}

fn apply_filter<'a>(
    mut query: enrollments::BoxedQuery<'a, Pg>,
    filter: &'a EnrollmentFilter,
) -> enrollments::BoxedQuery<'a, Pg> {
    if let Some(user_id) = filter.user_id() {
        query = query.filter(enrollments::user_id.eq(user_id));
    }
    if let Some(course_id) = filter.course_id() {
        query = query.filter(enrollments::course_id.eq(course_id));
    }
    query
}

fn to_sql_window(value: u64) -> Result<i64, EnrollmentRepositoryError> {
    i64::try_from(value)
        .map_err(|_| EnrollmentRepositoryError::query(format!("window value {value} out of range")))
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn create(&self, draft: &NewEnrollment) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewEnrollmentRow {
            user_id: draft.user_id(),
            course_id: draft.course_id(),
            status: draft.status().code(),
        };

        let row = diesel::insert_into(enrollments::table)
            .values(&new_row)
            .returning(EnrollmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_enrollment(row)
    }

    async fn list(
        &self,
        filter: &EnrollmentFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let offset = to_sql_window(offset)?;
        let limit = to_sql_window(limit)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EnrollmentRow> = apply_filter(enrollments::table.into_boxed(), filter)
            .select(EnrollmentRow::as_select())
            .order((enrollments::created_at.desc(), enrollments::id.desc()))
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_enrollment).collect()
    }

    async fn count(&self, filter: &EnrollmentFilter) -> Result<u64, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = apply_filter(enrollments::table.into_boxed(), filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        u64::try_from(total)
            .map_err(|_| EnrollmentRepositoryError::query(format!("negative count {total}")))
    }

    async fn update(
        &self,
        id: &EnrollmentId,
        status: Option<EnrollmentStatus>,
    ) -> Result<(), EnrollmentRepositoryError> {
        let Ok(key) = Uuid::parse_str(id.as_str()) else {
            return Err(EnrollmentRepositoryError::not_found(id.as_str()));
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let matched = match status {
            Some(status) => {
                let updated = diesel::update(enrollments::table.find(key))
                    .set(enrollments::status.eq(status.code()))
                    .execute(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                updated > 0
            }
            None => diesel::select(exists(enrollments::table.find(key)))
                .get_result::<bool>(&mut conn)
                .await
                .map_err(map_diesel_error)?,
        };

        if matched {
            Ok(())
        } else {
            Err(EnrollmentRepositoryError::not_found(id.as_str()))
        }
    }
}

//! In-memory doubles for integration tests.
//!
//! Compiled only with the `test-support` feature. The store honours the same
//! contract as the Diesel adapter: filters are conjunctive, listings are most
//! recent first, and updates of unknown identifiers report not found.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    CourseCatalogue, DirectoryError, EnrollmentRepository, EnrollmentRepositoryError,
    RemoteCourse, RemoteUser, UserDirectory,
};
use crate::domain::{
    Enrollment, EnrollmentFilter, EnrollmentId, EnrollmentRecord, EnrollmentStatus, NewEnrollment,
};

#[derive(Debug, Default)]
struct StoreState {
    next_id: u64,
    rows: Vec<Enrollment>,
}

/// Enrollment store kept in process memory.
///
/// Identifiers are zero-padded sequence numbers, so creation order is also
/// lexical identifier order. Creation timestamps come from the injected clock.
pub struct InMemoryEnrollmentRepository {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryEnrollmentRepository {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl InMemoryEnrollmentRepository {
    /// Create an empty store stamped by the system clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store stamped by `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, EnrollmentRepositoryError> {
        self.state
            .lock()
            .map_err(|_| EnrollmentRepositoryError::connection("in-memory store poisoned"))
    }

    /// Copy of every stored enrollment in insertion order.
    ///
    /// # Errors
    /// Fails only when a previous holder of the lock panicked.
    pub fn snapshot(&self) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        Ok(self.lock()?.rows.clone())
    }
}

fn most_recent_first(rows: &[Enrollment], filter: &EnrollmentFilter) -> Vec<Enrollment> {
    let mut matching: Vec<Enrollment> = rows
        .iter()
        .filter(|enrollment| filter.matches(enrollment))
        .cloned()
        .collect();
    matching.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().as_str().cmp(a.id().as_str()))
    });
    matching
}

fn to_index(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentRepository {
    async fn create(&self, draft: &NewEnrollment) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let id = EnrollmentId::new(format!("{:012}", state.next_id));
        let enrollment = draft.clone().into_enrollment(id, self.clock.utc());
        state.rows.push(enrollment.clone());
        Ok(enrollment)
    }

    async fn list(
        &self,
        filter: &EnrollmentFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let state = self.lock()?;
        Ok(most_recent_first(&state.rows, filter)
            .into_iter()
            .skip(to_index(offset))
            .take(to_index(limit))
            .collect())
    }

    async fn count(&self, filter: &EnrollmentFilter) -> Result<u64, EnrollmentRepositoryError> {
        let state = self.lock()?;
        let matching = state.rows.iter().filter(|e| filter.matches(e)).count();
        Ok(u64::try_from(matching).unwrap_or(u64::MAX))
    }

    async fn update(
        &self,
        id: &EnrollmentId,
        status: Option<EnrollmentStatus>,
    ) -> Result<(), EnrollmentRepositoryError> {
        let mut state = self.lock()?;
        let Some(row) = state.rows.iter_mut().find(|row| row.id() == id) else {
            return Err(EnrollmentRepositoryError::not_found(id.as_str()));
        };
        if let Some(status) = status {
            *row = Enrollment::from(EnrollmentRecord {
                id: row.id().clone(),
                user_id: row.user_id().to_owned(),
                course_id: row.course_id().to_owned(),
                status,
                created_at: row.created_at(),
            });
        }
        Ok(())
    }
}

/// Fixed set of identifiers a directory double recognises.
#[derive(Debug, Clone, Default)]
struct KnownIds {
    entity: &'static str,
    ids: HashSet<String>,
    outage: Option<String>,
}

impl KnownIds {
    fn new<I, S>(entity: &'static str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entity,
            ids: ids.into_iter().map(Into::into).collect(),
            outage: None,
        }
    }

    fn check(&self, id: &str) -> Result<(), DirectoryError> {
        if let Some(message) = &self.outage {
            return Err(DirectoryError::transport(message.clone()));
        }
        if self.ids.contains(id) {
            Ok(())
        } else {
            Err(DirectoryError::not_found(format!("{} {id} not found", self.entity)))
        }
    }
}

/// User directory recognising a fixed set of user ids.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    known: KnownIds,
}

impl StaticUserDirectory {
    /// Recognise exactly `ids`.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: KnownIds::new("user", ids),
        }
    }

    /// Fail every lookup with a transport error carrying `message`.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        let mut directory = Self::new(std::iter::empty::<String>());
        directory.known.outage = Some(message.into());
        directory
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn get(&self, id: &str) -> Result<RemoteUser, DirectoryError> {
        self.known.check(id)?;
        Ok(RemoteUser {
            id: id.to_owned(),
            email: None,
        })
    }
}

/// Course catalogue recognising a fixed set of course ids.
#[derive(Debug, Clone, Default)]
pub struct StaticCourseCatalogue {
    known: KnownIds,
}

impl StaticCourseCatalogue {
    /// Recognise exactly `ids`.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: KnownIds::new("course", ids),
        }
    }
}

#[async_trait]
impl CourseCatalogue for StaticCourseCatalogue {
    async fn get(&self, id: &str) -> Result<RemoteCourse, DirectoryError> {
        self.known.check(id)?;
        Ok(RemoteCourse {
            id: id.to_owned(),
            name: None,
        })
    }
}

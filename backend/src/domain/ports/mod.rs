//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`EnrollmentRepository`, `UserDirectory`, `CourseCatalogue`)
//! are implemented by outbound adapters. Driving ports (`EnrollmentCommand`,
//! `EnrollmentQuery`) are implemented by the domain service and consumed by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod directory;
mod enrollment_command;
mod enrollment_query;
mod enrollment_repository;

#[cfg(test)]
pub use directory::{MockCourseCatalogue, MockUserDirectory};
pub use directory::{
    CourseCatalogue, DirectoryError, FixtureCourseCatalogue, FixtureUserDirectory, RemoteCourse,
    RemoteUser, UserDirectory,
};
#[cfg(test)]
pub use enrollment_command::MockEnrollmentCommand;
pub use enrollment_command::{
    CreateEnrollmentRequest, EnrollmentCommand, UpdateEnrollmentStatusRequest,
};
#[cfg(test)]
pub use enrollment_query::MockEnrollmentQuery;
pub use enrollment_query::{EnrollmentQuery, ListEnrollmentsRequest, ListEnrollmentsResponse};
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use enrollment_repository::{
    EnrollmentRepository, EnrollmentRepositoryError, FixtureEnrollmentRepository,
};

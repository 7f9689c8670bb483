//! User and course directory adapters.
//!
//! HTTP implementations of the `UserDirectory` and `CourseCatalogue` ports.

mod dto;
mod http_directory;

pub use http_directory::{HttpCourseCatalogue, HttpUserDirectory};

//! DTOs for decoding user and course service responses.
//!
//! Both services answer either with a bare record or with the same success
//! envelope this service emits (`{ "status", "message", "data" }`).

use serde::Deserialize;

use crate::domain::ports::{RemoteCourse, RemoteUser};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum BodyDto<T> {
    Enveloped { data: T },
    Bare(T),
}

impl<T> BodyDto<T> {
    pub(super) fn into_inner(self) -> T {
        match self {
            Self::Enveloped { data } | Self::Bare(data) => data,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) email: Option<String>,
}

impl From<UserDto> for RemoteUser {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            email: value.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CourseDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) name: Option<String>,
}

impl From<CourseDto> for RemoteCourse {
    fn from(value: CourseDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

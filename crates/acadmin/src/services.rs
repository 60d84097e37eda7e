//! Resource services: CRUD verbs mapped to endpoint paths.
//!
//! One generic [`ResourceClient`] parametrized by the entity type replaces
//! the per-entity copies the records API's other clients grew; the entity
//! contributes only its base path and id accessor through [`Resource`].
//! Bodies and params pass through unchanged, and every call propagates the
//! normalized error envelope on failure.

use crate::error::ApiError;
use crate::models::{ClassSection, Enrollment, Instructor, Room, Student, Subject};
use crate::transport::ApiClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::info;

/// An entity the records API exposes as a CRUD collection.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path relative to the API base URL.
    const BASE_PATH: &'static str;

    /// Server-assigned id, absent before creation.
    fn id(&self) -> Option<i64>;
}

macro_rules! impl_resource {
    ($type:ty, $path:literal) => {
        impl Resource for $type {
            const BASE_PATH: &'static str = $path;

            fn id(&self) -> Option<i64> {
                self.id
            }
        }
    };
}

impl_resource!(Subject, "subjects");
impl_resource!(Instructor, "instructors");
impl_resource!(Room, "rooms");
impl_resource!(ClassSection, "class-sections");
impl_resource!(Student, "students");
impl_resource!(Enrollment, "enrollments");

/// Typed handle over the shared transport for one entity collection.
pub struct ResourceClient<R> {
    api: Arc<ApiClient>,
    _marker: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            _marker: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            _marker: PhantomData,
        }
    }

    /// GET the full collection, unpaginated, as the server returns it.
    pub async fn get_all(&self) -> Result<Vec<R>, ApiError> {
        self.api.get_json(R::BASE_PATH).await
    }

    /// GET a single record; fails with a not-found envelope if absent.
    pub async fn get_by_id(&self, id: i64) -> Result<R, ApiError> {
        self.api.get_json(&format!("{}/{id}", R::BASE_PATH)).await
    }

    /// POST the entity; the server assigns the id.
    pub async fn create(&self, entity: &R) -> Result<R, ApiError> {
        let created = self.api.post_json(R::BASE_PATH, entity).await?;
        info!(path = R::BASE_PATH, "created record");
        Ok(created)
    }

    /// PUT the full entity body (not a partial patch).
    pub async fn update(&self, id: i64, entity: &R) -> Result<R, ApiError> {
        let updated = self
            .api
            .put_json(&format!("{}/{id}", R::BASE_PATH), entity)
            .await?;
        info!(path = R::BASE_PATH, id, "updated record");
        Ok(updated)
    }

    /// DELETE a single record.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.api.delete(&format!("{}/{id}", R::BASE_PATH)).await?;
        info!(path = R::BASE_PATH, id, "deleted record");
        Ok(())
    }

    /// GET records with the active flag set, filtered server-side.
    pub async fn get_active(&self) -> Result<Vec<R>, ApiError> {
        self.get_by_active(true).await
    }

    /// GET records with the active flag cleared, filtered server-side.
    pub async fn get_inactive(&self) -> Result<Vec<R>, ApiError> {
        self.get_by_active(false).await
    }

    async fn get_by_active(&self, active: bool) -> Result<Vec<R>, ApiError> {
        self.api
            .get_json_query(R::BASE_PATH, &[("active", active.to_string())])
            .await
    }
}

impl ResourceClient<ClassSection> {
    /// GET the collection with foreign keys resolved into embedded snapshots.
    pub async fn get_all_with_relations(&self) -> Result<Vec<ClassSection>, ApiError> {
        self.api
            .get_json(&format!("{}/relations", ClassSection::BASE_PATH))
            .await
    }
}

impl ResourceClient<Subject> {
    /// GET subjects whose name matches the given value.
    pub async fn get_by_name(&self, name: &str) -> Result<Vec<Subject>, ApiError> {
        self.api
            .get_json(&format!("{}/name/{}", Subject::BASE_PATH, encode(name)))
            .await
    }
}

impl ResourceClient<Instructor> {
    /// GET instructors by registration code.
    pub async fn get_by_registration_code(&self, code: &str) -> Result<Vec<Instructor>, ApiError> {
        self.api
            .get_json(&format!(
                "{}/registration/{}",
                Instructor::BASE_PATH,
                encode(code)
            ))
            .await
    }
}

impl ResourceClient<Student> {
    /// GET students by registration code.
    pub async fn get_by_registration_code(&self, code: &str) -> Result<Vec<Student>, ApiError> {
        self.api
            .get_json(&format!(
                "{}/registration/{}",
                Student::BASE_PATH,
                encode(code)
            ))
            .await
    }
}

impl ResourceClient<Room> {
    /// GET rooms seating at least the given number.
    pub async fn get_by_min_capacity(&self, capacity: u32) -> Result<Vec<Room>, ApiError> {
        self.api
            .get_json(&format!("{}/capacity/{capacity}", Room::BASE_PATH))
            .await
    }
}

/// Percent-encodes a path segment.
fn encode(segment: &str) -> String {
    let mut result = String::with_capacity(segment.len() * 3);
    for c in segment.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            _ => {
                for byte in c.to_string().as_bytes() {
                    result.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    result
}

/// All six resource services over one shared transport client.
pub struct AdminApi {
    pub subjects: ResourceClient<Subject>,
    pub instructors: ResourceClient<Instructor>,
    pub rooms: ResourceClient<Room>,
    pub class_sections: ResourceClient<ClassSection>,
    pub students: ResourceClient<Student>,
    pub enrollments: ResourceClient<Enrollment>,
}

impl AdminApi {
    /// Wires the six services over an already-built transport client.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            subjects: ResourceClient::new(Arc::clone(&api)),
            instructors: ResourceClient::new(Arc::clone(&api)),
            rooms: ResourceClient::new(Arc::clone(&api)),
            class_sections: ResourceClient::new(Arc::clone(&api)),
            students: ResourceClient::new(Arc::clone(&api)),
            enrollments: ResourceClient::new(api),
        }
    }

    /// Builds the transport from the environment-aware default configuration
    /// and wires the services over it.
    pub fn connect() -> Result<Self, ApiError> {
        Ok(Self::new(Arc::new(ApiClient::new()?)))
    }
}

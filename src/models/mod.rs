pub mod course;
pub mod task;

use serde::{Deserialize, Deserializer};

pub use course::{CourseEdit, CourseRecord};
pub use task::{GenerateSummary, GeoInfo, TaskField, TaskStatus, TaskViewModel};

/// The backend emits `null` for unset columns; treat it like an absent key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

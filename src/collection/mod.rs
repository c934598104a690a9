//! Collection metadata
//!
//! Each queryable collection (CV results, flight logs, sensor readings) is
//! described by an immutable `CollectionDescriptor`. The query path is
//! generic over descriptors; nothing downstream names a collection.

mod descriptor;
mod registry;

pub use descriptor::{CollectionDescriptor, IndexDescriptor, ParamKind, ParamRole, ParamSpec};
pub use registry::{
    cv_results, flights, sensor_data, CollectionRegistry, RegistryError, CV_RESULTS, FLIGHTS,
    SENSOR_DATA,
};

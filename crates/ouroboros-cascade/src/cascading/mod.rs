//! Cascading metadata
//!
//! [`CascadingMetaDataBuilder`] collects cascade markers and group
//! conversions for one constrained element and its nested type arguments.
//! Builders from several declarations of the same element are merged, then
//! built once into an immutable [`CascadingMetaData`], at which point the
//! container shape of the element is decided against the registered value
//! extractors.

mod builder;
mod group_conversion;
mod metadata;

pub use builder::CascadingMetaDataBuilder;
pub use group_conversion::GroupConversions;
pub use metadata::{
    CascadingMetaData, ContainerCascadingMetaData, NonContainerCascadingMetaData,
    PotentiallyContainerCascadingMetaData,
};

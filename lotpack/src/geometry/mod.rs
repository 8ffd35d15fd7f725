pub mod geo_enums;
pub mod geo_traits;
pub mod primitives;

mod projection;

#[doc(inline)]
pub use projection::LocalProjection;
#[doc(inline)]
pub use projection::ProjectionMode;

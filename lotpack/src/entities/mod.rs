mod dimensions;
mod layout;
mod lot;
mod stall;

#[doc(inline)]
pub use dimensions::DimensionSet;
#[doc(inline)]
pub use dimensions::StallDims;
#[doc(inline)]
pub use layout::Layout;
#[doc(inline)]
pub use layout::LayoutWarning;
#[doc(inline)]
pub use lot::Lot;
#[doc(inline)]
pub use stall::Stall;

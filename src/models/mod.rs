//! Data model for scored submissions.

pub mod assessment;
pub mod enums;
pub mod features;
pub mod observation;

pub use assessment::*;
pub use enums::*;
pub use features::*;
pub use observation::*;

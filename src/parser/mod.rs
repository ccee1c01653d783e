pub mod fix;
pub mod interpolate;
pub mod main;
pub mod stream;

pub use fix::*;
pub use interpolate::*;
pub use main::*;
pub use stream::*;

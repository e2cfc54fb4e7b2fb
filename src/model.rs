pub mod accessibility_point;
pub mod route;
pub mod stop;

pub use accessibility_point::*;
pub use route::*;
pub use stop::*;

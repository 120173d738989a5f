pub mod error;
pub mod forecast;
pub mod macros;
pub mod orbit;
pub mod production;
pub mod staff;
pub mod time;

pub use error::*;
pub use forecast::*;
pub use orbit::*;
pub use production::*;
pub use staff::*;

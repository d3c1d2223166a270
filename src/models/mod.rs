pub mod driver;
pub mod fleet;
pub mod fuel;
pub mod maintenance;
pub mod validation;
pub mod vehicle;

pub use driver::*;
pub use fleet::*;
pub use fuel::*;
pub use maintenance::*;
pub use validation::*;
pub use vehicle::*;

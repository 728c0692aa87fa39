pub mod exchange;
pub mod invocation;
pub mod level;
pub mod order;
pub mod settings;

pub use exchange::*;
pub use invocation::*;
pub use level::*;
pub use order::*;
pub use settings::*;

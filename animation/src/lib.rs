mod animation;
mod clock;
mod interpolatable;
mod property;

pub use animation::*;
pub use clock::*;
pub use interpolatable::*;
pub use property::*;

pub mod iterated;
pub mod sampled;
mod traits;
pub mod transition;

pub use self::traits::*;
pub use self::transition::{transition_model, Transition};

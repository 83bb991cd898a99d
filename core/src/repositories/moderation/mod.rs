pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

#[cfg(any(test, feature = "mocks"))]
mod mock;

pub use r#trait::ModerationRepository;

#[cfg(any(test, feature = "mocks"))]
pub use mock::MockModerationRepository;

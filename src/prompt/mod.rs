//! Interactive prompt utilities for user input
//!
//! The module is structured in layers:
//! - `interface`: Pure abstract interfaces independent of any UI library
//! - `dialoguer`: Concrete implementation using the dialoguer library
//! - `automatic`: Scripted implementation for automation and tests

pub mod automatic;
pub mod dialoguer;
pub mod interface;

pub use self::automatic::AutomaticPrompter;
pub use self::dialoguer::DialoguerPrompter;
pub use self::interface::*;

/// Convenience function to create the default prompt provider
pub fn get_prompt_provider() -> impl PromptProvider {
    DialoguerPrompter::new()
}

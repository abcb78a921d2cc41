pub mod common;
pub mod dashboard;
pub mod guard;
pub mod layout;
pub mod onboarding;
pub mod predict;

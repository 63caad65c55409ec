//! Cross-component scenarios
//!
//! Exercises whole trees rather than single widgets: buttons inside panels
//! inside interfaces inside the manager.

mod routing;

//src/model/mod.rs
pub mod structure;
pub mod elements;

// Re-exports for cleaner imports
pub use structure::{Atom, Framework, UnitCell};
pub use elements::{is_t_site, SUBSTITUTE_ELEMENT, T_SITE_ELEMENT};

// src/model/elements.rs

/// Element occupying substitutable tetrahedral positions
pub const T_SITE_ELEMENT: &str = "Si";

/// Element written onto a T-site when it is substituted
pub const SUBSTITUTE_ELEMENT: &str = "Al";

/// Returns true if the element symbol marks a substitutable T-site
pub fn is_t_site(element: &str) -> bool {
    element == T_SITE_ELEMENT
}

/// Returns the Atomic Number (Z) for the framework elements
pub fn get_atomic_number(element: &str) -> i32 {
    match element {
        "H" => 1,
        "Li" => 3, "B" => 5, "C" => 6, "N" => 7, "O" => 8, "F" => 9,
        "Na" => 11, "Mg" => 12, "Al" => 13, "Si" => 14, "P" => 15,
        "K" => 19, "Ca" => 20, "Ti" => 22, "Fe" => 26, "Ga" => 31, "Ge" => 32,
        _ => 0, // Unknown/Dummy
    }
}

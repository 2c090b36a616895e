// Re-export the core pricing engine
pub use bonding_curve_core::*;

#[cfg(test)]
mod tests;

pub mod lessons;
pub mod scenarios;

// Re-export lesson loaders
pub use lessons::{edge_cases, english_basics};

// Re-export scenario questions
pub use scenarios::{animal_sounds, fox_and_fence, fruit_and_veg, letter_order, paris_passage};

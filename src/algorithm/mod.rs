/// Clearing, gravity and refill of the grid
pub mod collapse;
/// Board state and the move orchestrator
pub mod engine;
/// Run detection along rows and optionally columns
pub mod matching;
/// Seeded move picker and game tallies
pub mod player;
/// Token sources used for construction and refill
pub mod source;

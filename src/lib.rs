pub mod body;
pub mod c_api;
pub mod catalog;
pub mod config;
pub mod ephemera;
pub mod error;
pub mod interaction;
pub mod scene;
pub mod seeder;
pub mod simulation;
pub mod vector;

pub use body::{Body, Trail};
pub use catalog::InfoTable;
pub use config::{HoverTier, SelectionRestore, SimConfig};
pub use ephemera::{Bounds, Comet, EphemeraField, Star};
pub use error::{OrreryError, Result};
pub use interaction::InteractionController;
pub use scene::{BodySnapshot, Scene};
pub use seeder::SceneSeeder;
pub use simulation::{Simulation, compute_accelerations};
pub use vector::Vector2;

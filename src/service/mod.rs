//! Repositories: one unit struct per entity, each taking the pool explicitly.

mod cars;
mod drives;
mod exec;
mod posts;
mod users;
mod validation;
pub use cars::CarRepo;
pub use drives::DriveRepo;
pub use posts::PostRepo;
pub use users::UserRepo;
pub use validation::Validate;

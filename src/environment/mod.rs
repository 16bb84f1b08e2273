pub mod model;
pub mod storage;

pub use model::{Model, VersionCheckResult};

/// Services every reducer can reach. Cheap to clone; effects clone the
/// model handle into their futures.
#[derive(Clone, Debug)]
pub struct Environment {
    pub model: Model,
}

impl Environment {
    pub fn new(model: Model) -> Self {
        Self { model }
    }
}

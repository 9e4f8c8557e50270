use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PlanningError {
    #[error("Cannot generate a plan from an empty recipe catalog")]
    NoRecipesAvailable,
}

pub type PlanningResult<T> = Result<T, PlanningError>;

pub mod dashboard;
pub mod expenses;
pub mod login;
pub mod notes;
pub mod periods;
pub mod signup;

pub mod task;
pub mod user;

pub use task::{Task, TaskCreate, TaskPatch, TaskQuery, TaskStatus};
pub use user::{LoginForm, SignupRequest, TokenResponse, User, UserProfile};

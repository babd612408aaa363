pub mod keys;

mod batch;
mod project;

pub use batch::batch;
pub use project::{
    project_class, project_enrollment, project_seed, project_subject, project_user, DEFAULT_ROOM,
};

pub mod about;
pub mod contact;
pub mod projects;
pub mod skills;

pub use about::{AboutController, AboutPhase};
pub use contact::ContactController;
pub use projects::{BlobTarget, ProjectsController};
pub use skills::{SkillsController, SkillsPhase};

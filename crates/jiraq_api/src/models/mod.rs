mod field;
mod issue;

pub use field::{Field, FieldSchema};
pub use issue::{
    AdfDocument, Fields, Issue, IssueType, ParentFields, ParentLink, Priority, Status,
    StatusCategory, User, STORY_POINTS_FIELD,
};

//! Reusable UI components

mod banner;
mod note_card;
mod note_modal;
mod plan_info;

pub use banner::Banner;
pub use note_card::NoteCard;
pub use note_modal::{NoteEditor, NoteModal};
pub use plan_info::{LimitPrompt, PlanInfo};

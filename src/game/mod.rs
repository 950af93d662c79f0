pub mod choice;
pub mod rules;
pub mod source;

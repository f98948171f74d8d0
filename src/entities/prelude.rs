pub use super::members::Entity as Members;

pub mod credentials;
pub use credentials::CredentialHasher;

pub mod search;
pub use search::SearchService;

pub mod statistics;

pub mod member_service;
pub mod member_service_impl;
pub use member_service::{MemberError, MemberService};
pub use member_service_impl::SeaOrmMemberService;

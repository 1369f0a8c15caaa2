//! The individual rule stages, in their pipeline order.

mod aggregate;
mod duplicate;
mod email;
mod national_id;
mod password;
mod phone;
mod profile;
mod username;

pub use aggregate::AggregateValidator;
pub use duplicate::DuplicateValidator;
pub use email::EmailValidator;
pub use national_id::NationalIdValidator;
pub use password::PasswordValidator;
pub use phone::PhoneValidator;
pub use profile::ProfileValidator;
pub use username::UsernameValidator;

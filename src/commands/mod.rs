pub mod anonymize;
pub mod inspect;

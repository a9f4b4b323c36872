//! Domain models for the portal.

pub mod profile;
pub mod records;
pub mod request;
pub mod user;

pub use profile::{Employee, Profile, ProfileUpdate};
pub use records::{Absence, Charge, DocumentRecord, Punishment, UniformHandout, Vacation};
pub use request::{NewRequest, Request, RequestDetails, UniformRequestItem};
pub use user::{CurrentUser, User, session_keys};

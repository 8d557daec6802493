pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod media;
pub mod models;
pub mod upload;
pub mod utils;

pub use crate::auth::credentials::{CookieCredentials, CredentialSource, SharedCredentials};
pub use crate::client::client::AuthenticatedClient;
pub use crate::client::error::ClientError;
pub use crate::config::config::Config;
pub use crate::upload::form::{UploadFormController, ValidationError};

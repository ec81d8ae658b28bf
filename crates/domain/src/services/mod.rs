pub mod credential_hasher;
pub mod dispatcher;

pub use credential_hasher::CredentialHasher;
pub use dispatcher::{DispatchRequest, DispatchResponse, RequestBody, ResourceDispatcher};

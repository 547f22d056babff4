//! Transformers layer
//!
//! Request transformers turn canonical intent (media for analysis, analysis
//! plus style for captions) into a provider JSON body. Response transformers
//! pull the reply text back out of the provider JSON.

pub mod request;
pub mod response;

pub use request::RequestTransformer;
pub use response::ResponseTransformer;

mod data;
mod error;
mod executor;
pub mod extract;
mod http_client;
pub mod json_text;
pub mod render;
mod transcript;
mod util;

pub use data::{HttpMethod, RequestData, ResponseData};
pub use error::Error;
pub use executor::RequestExecutor;
pub use extract::{Payload, ResourceId, ResponseEnvelope};
pub use http_client::{HttpClient, HyperHttpClient};
pub use transcript::Transcript;

mod client;
pub mod protocol;

pub use client::{AkismetClient, HttpTransport, RawResponse, Transport};
pub use protocol::{CheckOutcome, ClassificationRequest, Method};

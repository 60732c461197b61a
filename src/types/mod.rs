pub mod form_values;
pub mod response;

pub use form_values::{ExperienceLevel, FormValues, ResumeTemplate};
pub use response::{NormalizedResult, WebhookResponse};

pub mod docs;
pub mod health;
pub mod metrics;
pub mod pdf;

pub use docs::root_redirect;
pub use health::{health_check, readiness_check};
pub use pdf::{generate_pdf_from_body, generate_pdf_from_file, generate_pdf_from_url};

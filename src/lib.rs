pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::entities::Session;
pub use domain::errors::ApiError;
pub use interface_adapters::clients::auth::AuthClient;
pub use interface_adapters::clients::files::FilesClient;
pub use interface_adapters::clients::notes::NotesClient;
pub use interface_adapters::http::ApiClient;
pub use interface_adapters::session::SessionStore;
pub use use_cases::guard::{check_navigation, GuardDecision, Route};

mod auth;
mod browse;
mod selection;
mod session;
mod workflow;

pub use auth::AuthMachine;
pub use auth::AuthState;
pub use auth::UNAUTHORIZED_NOTICE;
pub use browse::Browser;
pub use selection::RANDOM_PICK;
pub use selection::TrackSelection;
pub use session::FileStorage;
pub use session::KEY_ACCESS_TOKEN;
pub use session::KEY_CODE_VERIFIER;
pub use session::KEY_GENERATED_IMAGE;
pub use session::KEY_SELECTED_PLAYLIST;
pub use session::KEY_USER_ID_SEARCHED;
pub use session::MemoryStorage;
pub use session::SessionStorage;
pub use session::SessionStore;
pub use workflow::Workflow;
pub use workflow::WorkflowState;

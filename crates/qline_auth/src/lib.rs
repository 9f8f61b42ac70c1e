// Page access control: who is signed in, what their role allows, and where
// to send them otherwise.
pub mod demo;
pub mod gate;
pub mod mount;
pub mod navigator;
pub mod role;
pub mod session;

pub use demo::{DemoDirectory, DemoProfileStore, DemoSessionStore};
pub use gate::{AuthDecision, AuthGate, AuthPolicy, GateError, GuardOutcome};
pub use mount::{Mount, MountToken};
pub use navigator::{Navigator, RecordingNavigator};
pub use role::{Role, RoleRoutes};
pub use session::{AuthEvent, ProfileStore, Session, SessionStore, StoreError, UserProfile};

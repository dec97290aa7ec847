//! Page state for the four tools.
//!
//! DESIGN
//! ======
//! State is split per page (`feedback`, `chat`, `speech`) with `app` on top
//! holding navigation and the subject. Each page exposes plain fields plus
//! the operations a UI binds to its controls; network and audio come in
//! through traits so the same code runs under any front-end and in tests.

pub mod app;
pub mod chat;
pub mod feedback;
pub mod speech;

pub use app::{AppShell, Page};
pub use chat::{ChatMode, ChatSession};
pub use feedback::CheckAssignmentState;
pub use speech::{AudioPlayer, SpeechEngine, SpeechEvent, Utterance, Voice};

// =============================================================================
// TEST HELPERS
// =============================================================================

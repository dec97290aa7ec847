//! # client
//!
//! Front-end core for the assignment helper: the proxy client, the state of
//! each page, the speech player and the EN/SV translation table.
//!
//! Nothing here renders. A UI (or the `cli` crate) owns an [`state::AppShell`]
//! and drives it with user input, handing the page state a [`net::TutorApi`]
//! for the network and a [`state::speech::SpeechEngine`] for audio.

pub mod i18n;
pub mod net;
pub mod state;

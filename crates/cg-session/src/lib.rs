//! Level session controller for CyberGuard terminal levels.
//!
//! A session owns the current level, its scenario and the transcript. It
//! asks a [`ScenarioProvider`] for each level, runs player input through the
//! shell interpreter, awards completion bonuses and advances from level to
//! level until the final level is solved. The async driver in [`controller`]
//! runs the session as a single task that hosts talk to through a
//! [`SessionHandle`].

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod provider;
pub mod record;
pub mod session;
pub mod transcript;

pub use config::SessionConfig;
pub use controller::{SessionHandle, SessionRun, spawn};
pub use error::{ProviderError, ProviderResult, SessionError, SessionResult};
pub use events::{SessionEvent, SessionInput};
pub use provider::{
    CampaignProvider, DirectoryProvider, ScenarioProvider, TutorialProvider, offline_scenario,
};
pub use record::{LevelRecord, Scorecard, completion_bonus};
pub use session::{LevelSession, Next, Phase};
pub use transcript::Transcript;

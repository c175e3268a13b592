//! LiveDebate Core Library
//!
//! Drives hosted conversational voice agents to produce spoken debate
//! turns, validates the provider API key, and bridges to a cloud
//! text-to-speech backend for synthesis tests.

pub mod agent;
pub mod credentials;
pub mod env;
pub mod error;
pub mod speech;

pub use agent::{AgentTurnClient, AudioResult};
pub use credentials::ResolvedCredentials;
pub use env::Env;
pub use error::DebateError;
pub use speech::{AudioEncoding, SpeechSynthesizer, SynthesisRequest};

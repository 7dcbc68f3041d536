//! Completion system for the h5sh REPL
//!
//! An intelligent completion system built on a finite state machine (FSM)
//! that is error-tolerant and works with incomplete input: half-typed item
//! paths inside quotes, dangling dots, unclosed brackets.
//!
//! # Architecture
//!
//! - **TokenStream**: Expression tokens with cursor awareness
//! - **FSM**: Determines the completion context from the token sequence
//! - **Context**: Standardized representation of what to complete
//! - **Provider**: Fetches candidates from the live session
//! - **Engine**: Orchestrates the entire completion flow
//!
//! # Examples
//!
//! ```no_run
//! use h5sh::repl::completion::{CompletionEngine, SessionCandidateProvider};
//! use h5sh::repl::SharedState;
//! use std::sync::Arc;
//!
//! let shared_state = SharedState::new();
//! let provider = Arc::new(SessionCandidateProvider::new(shared_state, false));
//! let engine = CompletionEngine::new(provider);
//!
//! // Complete "f['it" with the cursor at the end
//! let (start, candidates) = engine.complete("f['it", 5);
//! // Returns item names under f's root starting with "it"
//! ```

mod context;
mod engine;
mod fsm;
mod provider;
mod token_stream;

pub use engine::{CompletionEngine, CompletionPair};
pub use provider::{CandidateProvider, SessionCandidateProvider};

//! # Events Module
//!
//! Progress reporting for the comparison pipeline.
//!
//! The pipeline emits events through a channel so the CLI (or any other
//! front end) can show what is happening without the core knowing about it.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Pipeline(PipelineEvent::PhaseChanged { phase }) = event {
//!             println!("{phase}...");
//!         }
//!     }
//! });
//!
//! pipeline.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;

//! Portfolio data model.
//!
//! Plain records with no behaviour beyond building updated copies. JSON field
//! names are camelCase so collections saved by earlier clients load unchanged.
//!
//! Ownership runs strictly downward: a [`Project`] owns its [`Instrument`]s in
//! order, and an instrument owns its [`Interaction`]s newest first.
//! `Instrument::project_id` is a back-reference only.

pub mod instrument;
pub mod interaction;
pub mod project;
pub mod user;

pub use instrument::{Instrument, NewInstrument};
pub use interaction::{Interaction, NewInteraction};
pub use project::{NewProject, Project};
pub use user::User;

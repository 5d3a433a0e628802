pub mod api;
pub mod dom;
pub mod error;
pub mod events;
pub mod form;
pub mod geometry;
pub mod menu;
pub mod nav;
pub mod observer;
pub mod schedule;
pub mod validate;

pub use api::{Environment, Vitrine};
pub use error::{Error, Result};
pub use events::{Event, Key};
pub use geometry::{Point, Rect, Size};

// Re-export the state records embedders snapshot most often
pub use form::{Banner, BannerKind, SubmitPhase};
pub use menu::MenuState;
pub use nav::{NavState, ScrollBehavior, ScrollRequest};
pub use validate::{FieldError, FieldName, FormInput};

//! Recipe suggestions, shopping lists and printable recipe cards.
//!
//! The string utilities ([`extract_title`], [`render_html`],
//! [`clean_display_name`]) are pure and total. Everything that talks to a
//! language model, a database or an auth service goes through
//! [`RecipeAssistant`] and the traits it is built from.

pub mod assistant;
pub mod auth;
pub mod card;
pub mod config;
pub mod display_name;
pub mod error;
pub mod occasion;
pub mod prompts;
pub mod providers;
pub mod session;
pub mod store;
pub mod title;

mod text;

pub use assistant::{RecipeAssistant, RecipeAssistantBuilder};
pub use auth::{AuthProvider, AuthUser, MemoryAuth, SupabaseAuth};
pub use card::{data_url, render_html, PRINT_BUTTON};
pub use config::{load_config, AppConfig};
pub use display_name::{clean_display_name, DEFAULT_DISPLAY_NAME_LEN};
pub use error::RecipeError;
pub use occasion::{current_occasion, occasion_for, Occasion};
pub use prompts::{RecipeKind, RecipeRequest};
pub use providers::TextGenerator;
pub use session::Session;
pub use store::{MemoryStore, RecordStore, SupabaseStore};
pub use title::{extract_title, UNTITLED_RECIPE};

//! Fetcha Core - Art and Fact Panel Rendering
//!
//! This crate renders a two-region terminal display: a block of decorative
//! art on the left and a list of labeled system facts on the right, aligned
//! row by row, colored with ANSI SGR sequences and truncated at the terminal
//! width. It performs no I/O of its own beyond the `Write` sink it is handed;
//! facts, identity and terminal width all come in through capabilities.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────────┐   ┌──────────────────┐
//! │  Art Model   │   │   Fact Renderer    │   │  IdentitySource  │
//! │ (art text →  │   │ (FactSource → rows │   │  (user, host)    │
//! │  tokens)     │   │  numbered/aligned) │   │                  │
//! └──────┬───────┘   └─────────┬──────────┘   └────────┬─────────┘
//!        │                     │                       │
//!        │              ┌──────┴───────────────────────┘
//!        │              │  Panel (header, boundary, facts, palette)
//!        └──────┬───────┘
//!               │
//!        ┌──────┴───────┐        ┌───────────────────────┐
//!        │  Compositor  │───────▶│ Width-Bounded Emitter │──▶ io::Write
//!        └──────────────┘        └───────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`RenderConfig`]: Immutable, validated configuration for one pass
//! - [`Art`]: Parsed art block with width, height and color directives
//! - [`FactSource`]: Capability producing one labeled fact
//! - [`IdentitySource`]: Capability naming the user and host
//! - [`RowWriter`]: Column-tracking writer that owns truncation
//!
//! # Quick Start
//!
//! ```
//! use fetcha_core::{render_to_string, Art, FactSource, Identity, RenderConfig, StaticFact};
//!
//! let mut config = RenderConfig::default();
//! config.color_enabled = false;
//! config.color_palette_show = false;
//!
//! let sources: Vec<Box<dyn FactSource>> = vec![Box::new(StaticFact::new("OS", "Arch Linux"))];
//! let identity = Identity::new("alice", "box");
//!
//! let out = render_to_string(&config, &Art::parse("/\\\n\\/\n"), &sources, &identity, None)
//!     .expect("identity is known");
//! assert!(out.contains("alice@box"));
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod art;
pub mod compositor;
pub mod config;
pub mod emitter;
pub mod facts;
pub mod identity;
pub mod terminal;

// Re-exports for convenience
pub use art::{Art, ArtToken, BUILTIN_ART};
pub use compositor::{render, render_to_string, Compositor, Panel, PaletteKind, PanelItem, RenderError};
pub use config::{
    default_config_path, load_config, load_config_from_path, load_config_with_env, parse_config,
    ConfigError, ConfigOverrides, ConfigSource, Palette, RenderConfig, Role,
};
pub use emitter::RowWriter;
pub use facts::{render_facts, FactOptions, FactSource, RenderedFacts, RenderedRow, StaticFact, PLACEHOLDER};
pub use identity::{Identity, IdentityError, IdentitySource, SystemIdentity};
pub use terminal::{terminal_width, wrap_width};

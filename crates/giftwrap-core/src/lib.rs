//! giftwrap Core Library
//!
//! This crate provides the core of giftwrap, a builder for personalized gift
//! pages assembled from typed, individually styled blocks.
//!
//! # Architecture
//!
//! - **BlockStore**: owns the document and the bulk-action selection; every
//!   mutation is written through to persistence before it returns
//! - **Codec**: the pretty-printed JSON interchange format used for both
//!   export/import and the saved document
//! - **Renderer dispatch**: type tag to renderer, with a placeholder for
//!   tags nothing renders
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut store = BlockStore::open_with_config(&config)?;
//!
//! let hero = store.add_block("hero");
//! store.set_theme("romantic");
//!
//! let preview = RendererRegistry::text().render_document(store.document(), false);
//! ```
//!
//! # Modules
//!
//! - `store`: the block store (main entry point)
//! - `content`: block types and their content schemas
//! - `block`: block ids and styles
//! - `document`: the persisted unit
//! - `selection`: bulk-action selection
//! - `theme`: presets and theme resolution
//! - `codec`: export/import
//! - `storage`: key/value persistence
//! - `render`: renderer dispatch and the text renderer
//! - `generate`: AI-assisted content generation
//! - `config`: application configuration

pub mod block;
pub mod codec;
pub mod config;
pub mod content;
pub mod document;
pub mod document_id;
pub mod generate;
pub mod render;
pub mod selection;
pub mod storage;
pub mod store;
pub mod theme;

pub use block::{Align, Background, Block, BlockId, BlockStyle, Padding, Width};
pub use codec::{ImportError, ImportOptions, EXPORT_FILE_NAME, SCHEMA_VERSION};
pub use config::Config;
pub use content::{BlockCategory, BlockContent, BlockKind};
pub use document::Document;
pub use document_id::{DocumentId, DocumentIdError};
pub use generate::{AiTask, GeminiClient, GenerateError, Generator, Tone};
pub use render::{BlockRenderer, RendererRegistry, TextRenderer};
pub use selection::Selection;
pub use storage::{FilePersistence, MemoryPersistence, Persistence, StorageError};
pub use store::{BlockStore, DiscardedDocument, Direction, UnknownFont};
pub use theme::{ThemeDef, ThemePreset};

//! Block type registry.
//!
//! Both transcoder halves dispatch through here: the parser looks handlers up
//! by dialect tag, the generator by block type. New block types are added by
//! registering a handler — nothing in the core switches exhaustively over
//! block types.

use crate::id_generator::IdGenerator;
use crate::markup::MarkupElement;
use crate::model::{Block, BlockType, Properties};
use crate::serializer::Context;
use serde_json::Value;
use std::collections::HashMap;

/// A block type's parse/generate/validate/defaults quadruple.
pub trait BlockHandler: Send + Sync {
    /// The block type this handler produces.
    fn block_type(&self) -> BlockType;

    /// The dialect tag this handler parses.
    fn tag(&self) -> &'static str;

    /// The editor's full default property set for new blocks of this type.
    fn default_properties(&self) -> Properties;

    /// Parse a dialect element into a block. `None` drops the element.
    fn parse(&self, element: &MarkupElement, ids: &mut IdGenerator) -> Option<Block>;

    /// Emit the block as dialect markup.
    fn generate(&self, block: &Block, ctx: &mut Context);

    /// Check property shape, appending path-qualified messages. Default: no
    /// constraints beyond "is an object", which the validator checks itself.
    fn validate_properties(&self, properties: &Properties, path: &str, errors: &mut Vec<String>) {
        let _ = (properties, path, errors);
    }
}

pub struct BlockRegistry {
    handlers: Vec<Box<dyn BlockHandler>>,
    by_tag: HashMap<String, usize>,
    by_type: HashMap<BlockType, usize>,
}

impl BlockRegistry {
    /// Registry with all built-in block handlers.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for handler in crate::blocks::builtin_handlers() {
            registry.register(handler);
        }
        registry
    }

    pub fn empty() -> Self {
        Self {
            handlers: Vec::new(),
            by_tag: HashMap::new(),
            by_type: HashMap::new(),
        }
    }

    /// Register a handler. A handler registered later for an existing tag or
    /// type replaces the earlier routing (last registration wins).
    pub fn register(&mut self, handler: Box<dyn BlockHandler>) {
        let index = self.handlers.len();
        self.by_tag.insert(handler.tag().to_string(), index);
        self.by_type.insert(handler.block_type(), index);
        self.handlers.push(handler);
    }

    pub fn handler_for_tag(&self, tag: &str) -> Option<&dyn BlockHandler> {
        self.by_tag.get(tag).map(|&i| self.handlers[i].as_ref())
    }

    pub fn handler_for_type(&self, block_type: &BlockType) -> Option<&dyn BlockHandler> {
        self.by_type.get(block_type).map(|&i| self.handlers[i].as_ref())
    }

    pub fn is_known_type(&self, block_type: &BlockType) -> bool {
        self.by_type.contains_key(block_type)
    }

    pub fn known_types(&self) -> impl Iterator<Item = &BlockType> {
        self.by_type.keys()
    }

    /// New block of the given type with a fresh id and the editor's full
    /// default property set. `None` for unregistered types.
    pub fn create_block(&self, block_type: &BlockType, ids: &mut IdGenerator) -> Option<Block> {
        let handler = self.handler_for_type(block_type)?;
        Some(Block::new(
            ids,
            handler.block_type(),
            handler.default_properties(),
        ))
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BlockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockRegistry")
            .field("handlers", &format!("{} handlers", self.handlers.len()))
            .finish()
    }
}

/// Convenience for handlers building their default property maps from
/// `serde_json::json!` literals.
pub(crate) fn object_props(value: Value) -> Properties {
    match value {
        Value::Object(map) => map,
        _ => Properties::new(),
    }
}

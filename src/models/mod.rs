//! Data models for annotag.

mod alias;
mod reference;
mod tag;

pub use alias::Alias;
pub use reference::{ReferenceKey, VOCAB_PREFIX};
pub use tag::{
    is_custom_category, merge_new_tags, next_custom_id, next_standard_id, normalize,
    IdSpaceExhausted, NewTag, Tag, TagId, CUSTOM_CATEGORIES,
};

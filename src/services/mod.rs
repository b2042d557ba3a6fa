pub mod artist;
pub mod delivery;
pub mod fan_page;
pub mod fan_page_modules;
pub mod feature_flags;
pub mod feature_fm;
pub mod og_tags;
pub mod release;
pub mod release_format;
pub mod slug;
pub mod warehouse;

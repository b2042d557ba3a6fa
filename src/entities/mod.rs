pub mod artist;
pub mod artist_platform_summary;
pub mod asset;
pub mod dim_track;
pub mod fan_page;
pub mod fan_page_module;
pub mod json_types;
pub mod release;
pub mod release_external_url;
pub mod track;

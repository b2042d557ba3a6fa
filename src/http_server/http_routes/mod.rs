pub mod fan_page;

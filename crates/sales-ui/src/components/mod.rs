//! Reusable line-based building blocks for the dashboard panels.

pub mod bar_list;
pub mod header;

pub mod overdamped;

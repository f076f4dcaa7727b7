pub mod stats_formatter;
pub mod stats_view;

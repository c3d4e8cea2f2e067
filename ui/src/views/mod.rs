mod dashboard;
pub use dashboard::Dashboard;

mod guide;
pub use guide::ColumnGuide;

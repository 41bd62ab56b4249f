pub mod ordered;
pub mod plots;
pub mod quality;
pub mod report;

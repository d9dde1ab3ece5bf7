pub mod portfolio;
pub mod stylization;
